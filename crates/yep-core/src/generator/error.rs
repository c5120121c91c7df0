//! # YEP Core Generator Errors
//!
//! Everything that can go wrong in the parent process before (or while)
//! handing over to the generated program. All of these are fatal.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Cannot resolve the configuration package at '{path}': {reason}")]
    Discovery { path: PathBuf, reason: String },

    #[error("'{ident}' is not a valid module path")]
    InvalidModuleIdent { ident: String },

    #[error("Failed to start '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    pub(crate) fn discovery(path: PathBuf, reason: impl Into<String>) -> Self {
        GeneratorError::Discovery {
            path,
            reason: reason.into(),
        }
    }
}
