//! # YEP Core Configuration Errors
//!
//! Errors raised while reading a configuration file on the parent side.
//! Values themselves are never rejected here; bootstrap stages do that.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error while reading configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported configuration format for path: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Deserialization from '{format}' failed for '{path}': {source}")]
    Deserialization {
        format: String,
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Configuration key '{key}' holds a value that is not a scalar ({kind})")]
    UnsupportedValue { key: String, kind: String },

    #[error("Configuration root of '{0}' must be a table of keys")]
    NotATable(PathBuf),
}
