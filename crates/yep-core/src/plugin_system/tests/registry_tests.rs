use std::sync::Arc;

use crate::plugin_system::{Module, ModuleRegistry, ModuleSystemError};
use crate::tests::common::{Journal, RecordingModule};

struct LinkedModule;

impl Module for LinkedModule {
    fn name(&self) -> &str {
        "linked"
    }
}

crate::register_module!(LinkedModule);

#[test]
fn test_register_rejects_duplicate_names() {
    let journal = Journal::new();
    let mut registry = ModuleRegistry::new();
    registry.register(Arc::new(RecordingModule::new("sales", journal.clone()))).unwrap();

    let err = registry
        .register(Arc::new(RecordingModule::new("sales", journal)))
        .unwrap_err();
    assert!(matches!(err, ModuleSystemError::DuplicateModule { name } if name == "sales"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_registry_keeps_insertion_order() {
    let journal = Journal::new();
    let mut registry = ModuleRegistry::new();
    for name in ["stock", "base", "sales"] {
        registry.register(Arc::new(RecordingModule::new(name, journal.clone()))).unwrap();
    }
    assert_eq!(registry.names(), vec!["stock", "base", "sales"]);
    assert!(registry.contains("base"));
    assert!(!registry.contains("hr"));
}

#[test]
fn test_macro_registration_is_collected() {
    let registry = ModuleRegistry::from_registered().unwrap();
    assert!(registry.contains("linked"));
    // Collecting twice gives the same order
    assert_eq!(registry.names(), ModuleRegistry::from_registered().unwrap().names());
}
