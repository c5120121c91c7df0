use std::any::Any;
use std::fmt::{self, Debug};
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::storage::descriptor::ConnectionDescriptor;
use crate::storage::error::StorageError;

/// Error type drivers report; the core only wraps and displays it.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Live storage handle produced by a driver.
///
/// The core never looks inside; layers that know the concrete type get it
/// back with [`downcast_connection`].
pub trait Connection: Any + Send + Sync + Debug {
    fn driver(&self) -> &str;
}

/// Recovers the concrete connection type behind a shared handle.
pub fn downcast_connection<T: Connection>(connection: &Arc<dyn Connection>) -> Option<Arc<T>> {
    let arc_any: Arc<dyn Any + Send + Sync> = connection.clone();
    Arc::downcast::<T>(arc_any).ok()
}

/// Persistence-layer entry point: `connect(driver, descriptor)`.
#[async_trait]
pub trait StorageDriver: Send + Sync {
    /// Name matched against `Server.DBDriver`.
    fn name(&self) -> &str;

    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> std::result::Result<Arc<dyn Connection>, DriverError>;
}

/// Builds a driver instance; used by `register_storage_driver!`.
pub type DriverFactory = fn() -> Arc<dyn StorageDriver>;

/// Link-time registration of a storage driver.
pub struct StorageDriverRegistration {
    pub origin: &'static str,
    pub build: DriverFactory,
}

impl StorageDriverRegistration {
    pub const fn new(origin: &'static str, build: DriverFactory) -> Self {
        Self { origin, build }
    }
}

inventory::collect!(StorageDriverRegistration);

/// Registers a storage driver under its [`StorageDriver::name`].
#[macro_export]
macro_rules! register_storage_driver {
    ($driver:expr) => {
        $crate::__private::inventory::submit! {
            $crate::storage::StorageDriverRegistration::new(
                ::core::module_path!(),
                || -> ::std::sync::Arc<dyn $crate::storage::StorageDriver> {
                    ::std::sync::Arc::new($driver)
                },
            )
        }
    };
}

/// Drivers available to the connect-storage stage, keyed by name.
#[derive(Default)]
pub struct DriverRegistry {
    drivers: IndexMap<String, Arc<dyn StorageDriver>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every driver registered with `register_storage_driver!`.
    pub fn from_registered() -> Result<Self, StorageError> {
        let mut registry = Self::new();
        for registration in inventory::iter::<StorageDriverRegistration> {
            let driver = (registration.build)();
            log::debug!("Found storage driver '{}' from {}", driver.name(), registration.origin);
            registry.register(driver)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, driver: Arc<dyn StorageDriver>) -> Result<(), StorageError> {
        let name = driver.name().to_string();
        if self.drivers.contains_key(&name) {
            return Err(StorageError::DuplicateDriver { driver: name });
        }
        self.drivers.insert(name, driver);
        Ok(())
    }

    pub fn has_driver(&self, name: &str) -> bool {
        self.drivers.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.drivers.keys().cloned().collect()
    }

    /// Opens a connection with the driver named by the descriptor. No retry.
    pub async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Arc<dyn Connection>, StorageError> {
        let driver = self
            .drivers
            .get(descriptor.driver())
            .ok_or_else(|| StorageError::UnknownDriver {
                driver: descriptor.driver().to_string(),
                available: self.names(),
            })?;

        driver
            .connect(descriptor)
            .await
            .map_err(|source| StorageError::ConnectFailed {
                driver: descriptor.driver().to_string(),
                descriptor: descriptor.redacted().to_string(),
                source,
            })
    }
}

impl Debug for DriverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.drivers.keys().collect::<Vec<_>>())
            .finish()
    }
}
