//! # yep-core
//!
//! Assembles a YEP server from the plugin modules a project declares and brings
//! it up through a fixed bootstrap sequence.
//!
//! The parent side ([`generator`]) discovers the modules listed by the
//! project's configuration package, renders a throwaway `main` that links them
//! in and launches it with `cargo run`. The child side ([`start_server`]) runs
//! the bootstrap pipeline of [`stage_manager`] against the collaborators
//! registered through [`register_module!`], [`register_storage_driver!`] and
//! [`register_server!`].
pub mod config;
pub mod generator;
pub mod kernel;
pub mod logging;
pub mod plugin_system;
pub mod stage_manager;
pub mod storage;
pub mod utils;

pub use config::{SettingValue, Settings};
pub use kernel::error::Error as KernelError;
pub use kernel::{start_server, Application};
pub use plugin_system::Module;
pub use stage_manager::BootstrapPhase;

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}

#[cfg(test)]
mod tests;
