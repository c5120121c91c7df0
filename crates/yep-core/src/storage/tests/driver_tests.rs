use std::sync::Arc;

use crate::config::ServerSettings;
use crate::storage::{downcast_connection, ConnectionDescriptor, DriverRegistry, StorageError};
use crate::tests::common::{memory_settings, Journal, MemoryConnection, MemoryDriver};

fn memory_descriptor() -> ConnectionDescriptor {
    ConnectionDescriptor::from_settings(&ServerSettings::from_settings(&memory_settings()))
}

#[tokio::test]
async fn test_connect_with_registered_driver() {
    let journal = Journal::new();
    let mut registry = DriverRegistry::new();
    registry.register(Arc::new(MemoryDriver::new(journal.clone()))).unwrap();

    let connection = registry.connect(&memory_descriptor()).await.unwrap();
    assert_eq!(connection.driver(), "memory");

    let memory = downcast_connection::<MemoryConnection>(&connection).expect("concrete type");
    assert_eq!(memory.dsn, "dbname=testdb sslmode=disable");
    assert_eq!(journal.entries(), vec!["connect:dbname=testdb sslmode=disable"]);
}

#[tokio::test]
async fn test_unknown_driver_lists_available() {
    let mut registry = DriverRegistry::new();
    registry.register(Arc::new(MemoryDriver::new(Journal::new()))).unwrap();

    let descriptor = ConnectionDescriptor::from_settings(&ServerSettings::default());
    match registry.connect(&descriptor).await {
        Err(StorageError::UnknownDriver { driver, available }) => {
            assert_eq!(driver, "postgres");
            assert_eq!(available, vec!["memory"]);
        }
        other => panic!("unexpected result: {:?}", other.map(|c| c.driver().to_string())),
    }
}

#[tokio::test]
async fn test_connect_failure_is_wrapped() {
    let mut registry = DriverRegistry::new();
    registry
        .register(Arc::new(MemoryDriver::failing(Journal::new(), "connection refused")))
        .unwrap();

    let err = registry.connect(&memory_descriptor()).await.unwrap_err();
    assert!(matches!(err, StorageError::ConnectFailed { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_duplicate_driver_names() {
    let mut registry = DriverRegistry::new();
    registry.register(Arc::new(MemoryDriver::new(Journal::new()))).unwrap();
    let err = registry.register(Arc::new(MemoryDriver::new(Journal::new()))).unwrap_err();
    assert!(matches!(err, StorageError::DuplicateDriver { driver } if driver == "memory"));
    assert!(registry.has_driver("memory"));
}
