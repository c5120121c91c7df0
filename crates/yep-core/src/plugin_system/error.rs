//! # YEP Core Module System Errors
//!
//! Errors raised while collecting registered modules or while a module
//! contributes to one of the layers.
use crate::kernel::component::LayerKind;
use crate::kernel::error::Error as KernelError;

#[derive(Debug, thiserror::Error)]
pub enum ModuleSystemError {
    #[error("Module '{name}' is registered more than once")]
    DuplicateModule { name: String },

    #[error("Module '{module}' failed while bootstrapping {layer}: {source}")]
    HookFailed {
        module: String,
        layer: LayerKind,
        #[source]
        source: Box<KernelError>,
    },
}
