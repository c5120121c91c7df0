//! # YEP Core Storage
//!
//! Boundary to the persistence layer. The core only assembles the
//! [`ConnectionDescriptor`] from the server settings and asks the
//! [`StorageDriver`] registered under `Server.DBDriver` to open a
//! [`Connection`]; pooling and retries belong to the driver.
pub mod descriptor;
pub mod driver;
pub mod error;

pub use descriptor::{ConnectionDescriptor, DEFAULT_DB_PORT};
pub use driver::{
    downcast_connection, Connection, DriverError, DriverRegistry, StorageDriver,
    StorageDriverRegistration,
};
pub use error::StorageError;

#[cfg(test)]
mod tests;
