//! # YEP Core Storage Errors
//!
//! Errors raised while resolving a storage driver or opening the connection
//! during the connect-storage stage. Both are fatal for the bootstrap.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No storage driver registered under '{driver}' (available: {available:?})")]
    UnknownDriver { driver: String, available: Vec<String> },

    #[error("Storage driver '{driver}' is registered more than once")]
    DuplicateDriver { driver: String },

    #[error("Connecting with driver '{driver}' to '{descriptor}' failed: {source}")]
    ConnectFailed {
        driver: String,
        /// Descriptor with the password redacted
        descriptor: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
