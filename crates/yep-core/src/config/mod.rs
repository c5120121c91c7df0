//! # YEP Core Configuration
//!
//! Settings travel from the parent to the child as code: the parent resolves
//! them (defaults, an optional file, command-line flags), [`literal::serialize`]
//! turns them into a Rust expression embedded in the generated entry point, and
//! the child's connect-storage stage applies them to a [`SettingsStore`] before
//! freezing it.
//!
//! Keys are dotted and case-sensitive (`Server.DBName`); see [`keys`] for the
//! ones the core reads.
pub mod error;
pub mod file;
pub mod literal;
pub mod server;
pub mod settings;

pub use error::ConfigError;
pub use file::{load_settings_file, parse_settings, ConfigFormat};
pub use literal::serialize;
pub use server::{default_settings, keys, RuntimeMode, ServerSettings};
pub use settings::{SettingValue, Settings, SettingsStore};

#[cfg(test)]
mod tests;
