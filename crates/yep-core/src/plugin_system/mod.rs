//! # YEP Core Module System
//!
//! Plugin modules are ordinary crates linked into the generated entry point.
//! Each one registers itself at link time with [`register_module!`]; the
//! bootstrap collects the registrations into a [`ModuleRegistry`] and the
//! default [`ModuleLayer`]s call every module's hook for the layer being
//! finalized.
//!
//! - **[`traits`]**: the [`Module`] trait and its per-layer hooks.
//! - **[`registry`]**: link-time registration and the ordered [`ModuleRegistry`].
//! - **[`layer`]**: [`ModuleLayer`], the default model/view/action/controller layer.
//! - **[`error`]**: [`ModuleSystemError`].
pub mod error;
pub mod layer;
pub mod registry;
pub mod traits;

pub use error::ModuleSystemError;
pub use layer::ModuleLayer;
pub use registry::{ModuleRegistration, ModuleRegistry};
pub use traits::Module;

#[cfg(test)]
mod tests;
