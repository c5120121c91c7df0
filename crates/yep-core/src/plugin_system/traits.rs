use crate::kernel::component::{LayerContext, LayerKind};
use crate::kernel::error::Result;

/// A plugin module: one unit of model, view, action and controller
/// contributions.
///
/// Every hook defaults to doing nothing, so a module only implements the
/// layers it contributes to. Hooks run once per process, layer by layer, in
/// module registration order.
pub trait Module: Send + Sync {
    /// Unique name of the module
    fn name(&self) -> &str;

    fn bootstrap_models(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        Ok(())
    }

    fn bootstrap_views(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        Ok(())
    }

    fn bootstrap_actions(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        Ok(())
    }

    fn bootstrap_controllers(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Dispatches to the hook matching `kind`.
pub(crate) fn run_hook(module: &dyn Module, kind: LayerKind, ctx: &LayerContext<'_>) -> Result<()> {
    match kind {
        LayerKind::Models => module.bootstrap_models(ctx),
        LayerKind::Views => module.bootstrap_views(ctx),
        LayerKind::Actions => module.bootstrap_actions(ctx),
        LayerKind::Controllers => module.bootstrap_controllers(ctx),
    }
}
