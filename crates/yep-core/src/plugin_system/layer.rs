use std::sync::Arc;

use async_trait::async_trait;

use crate::kernel::component::{Layer, LayerContext, LayerKind};
use crate::kernel::error::Result;
use crate::plugin_system::error::ModuleSystemError;
use crate::plugin_system::registry::ModuleRegistry;
use crate::plugin_system::traits::run_hook;

/// Default layer: finalizes one layer by running the matching hook of every
/// registered module, in registry order. The first failing module aborts it.
#[derive(Debug, Clone)]
pub struct ModuleLayer {
    kind: LayerKind,
    name: String,
    modules: Arc<ModuleRegistry>,
}

impl ModuleLayer {
    pub fn new(kind: LayerKind, modules: Arc<ModuleRegistry>) -> Self {
        Self {
            kind,
            name: format!("module-{}", kind.name()),
            modules,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }
}

#[async_trait]
impl Layer for ModuleLayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn bootstrap(&self, ctx: &LayerContext<'_>) -> Result<()> {
        log::debug!("Bootstrapping {} for {} modules", self.kind, self.modules.len());
        for module in self.modules.iter() {
            run_hook(module.as_ref(), self.kind, ctx).map_err(|source| {
                ModuleSystemError::HookFailed {
                    module: module.name().to_string(),
                    layer: self.kind,
                    source: Box::new(source),
                }
            })?;
        }
        Ok(())
    }
}
