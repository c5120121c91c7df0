//! # YEP Core Kernel Errors
//!
//! Defines the crate-wide error type.
//!
//! [`Error`] aggregates the typed errors of every subsystem (configuration,
//! generator, storage, modules and the stage pipeline) so that the bootstrap
//! sequence and the CLI can propagate any of them with `?`.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::error::ConfigError;
use crate::generator::error::GeneratorError;
use crate::plugin_system::error::ModuleSystemError;
use crate::stage_manager::error::StageSystemError;
use crate::storage::error::StorageError;

/// Custom error type for YEP
#[derive(Debug, ThisError)]
pub enum Error {
    /// Configuration file or settings error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Discovery, synthesis or launch error on the parent side
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// Storage driver lookup or connection error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Module registration or module hook error
    #[error("Module system error: {0}")]
    ModuleSystem(#[from] ModuleSystemError),

    /// Specific, typed stage system error
    #[error("Stage system error: {0}")]
    StageSystem(#[from] StageSystemError),

    /// Error occurring during a specific kernel lifecycle phase.
    #[error("Kernel lifecycle error during {phase:?}: {message}")]
    KernelLifecycleError {
        phase: KernelLifecyclePhase,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    /// Failure reported by an external collaborator (layer, server, driver)
    #[error("{name} failed: {message}")]
    Collaborator { name: String, message: String },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Represents a specific phase in the kernel's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum KernelLifecyclePhase {
    /// Building the application from the link-time registries
    #[error("Assemble")]
    Assemble,
    /// Creating the async runtime that drives the bootstrap
    #[error("Runtime")]
    Runtime,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl Error {
    /// Error reported by a collaborator such as a layer or the server.
    pub fn collaborator(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Collaborator {
            name: name.into(),
            message: message.into(),
        }
    }

    pub(crate) fn lifecycle(phase: KernelLifecyclePhase, message: impl Into<String>) -> Self {
        Error::KernelLifecycleError {
            phase,
            message: message.into(),
            source: None,
        }
    }

    /// The async runtime could not be built.
    pub(crate) fn runtime(source: std::io::Error) -> Self {
        Error::KernelLifecycleError {
            phase: KernelLifecyclePhase::Runtime,
            message: "failed to build the async runtime".to_string(),
            source: Some(Box::new(source)),
        }
    }
}
