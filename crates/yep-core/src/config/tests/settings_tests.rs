use crate::config::{default_settings, keys, RuntimeMode, ServerSettings, SettingValue, Settings, SettingsStore};

#[test]
fn test_string_coercion() {
    assert_eq!(SettingValue::Integer(6000).as_string(), "6000");
    assert_eq!(SettingValue::Bool(true).as_string(), "true");
    assert_eq!(SettingValue::Float(1.5).as_string(), "1.5");
    assert_eq!(SettingValue::from("db1").as_string(), "db1");
}

#[test]
fn test_bool_coercion() {
    assert_eq!(SettingValue::from("true").as_bool(), Some(true));
    assert_eq!(SettingValue::from("1").as_bool(), Some(true));
    assert_eq!(SettingValue::from("0").as_bool(), Some(false));
    assert_eq!(SettingValue::from("").as_bool(), Some(false));
    assert_eq!(SettingValue::Integer(2).as_bool(), Some(true));
    assert_eq!(SettingValue::from("maybe").as_bool(), None);
    assert_eq!(SettingValue::Float(1.0).as_bool(), None);
}

#[test]
fn test_set_replaces_and_returns_previous() {
    let mut settings = Settings::new();
    assert_eq!(settings.set("Server.DBName", "a"), None);
    assert_eq!(settings.set("Server.DBName", "b"), Some(SettingValue::from("a")));
    assert_eq!(settings.get_string("Server.DBName").as_deref(), Some("b"));
    assert_eq!(settings.len(), 1);
}

#[test]
fn test_keys_are_case_sensitive_and_sorted() {
    let settings = Settings::from_entries([
        ("b.key", SettingValue::Integer(1)),
        ("A.key", SettingValue::Integer(2)),
        ("a.key", SettingValue::Integer(3)),
    ]);
    assert_eq!(settings.keys().collect::<Vec<_>>(), vec!["A.key", "a.key", "b.key"]);
}

#[test]
fn test_store_apply_overwrites_defaults() {
    let mut store = SettingsStore::with_defaults();
    assert_eq!(store.get(keys::DB_NAME), Some(&SettingValue::from("yep")));

    let mut propagated = Settings::new();
    propagated.set(keys::DB_NAME, "shop");
    propagated.set("Custom.Flag", true);
    store.apply(&propagated);

    let frozen = store.freeze();
    assert_eq!(frozen.get_string(keys::DB_NAME).as_deref(), Some("shop"));
    assert_eq!(frozen.get_bool("Custom.Flag"), Some(true));
    // Untouched defaults survive
    assert_eq!(frozen.get_string(keys::DB_PORT).as_deref(), Some("5432"));
}

#[test]
fn test_server_settings_defaults() {
    let server = ServerSettings::from_settings(&Settings::new());
    assert_eq!(server, ServerSettings::from_settings(&default_settings()));
    assert_eq!(server.db_driver, "postgres");
    assert_eq!(server.db_port, "5432");
    assert_eq!(server.db_name, "yep");
    assert_eq!(server.runtime_mode(), RuntimeMode::Release);
}

#[test]
fn test_server_settings_reads_typed_values() {
    let mut settings = Settings::new();
    settings.set(keys::DB_PORT, 6000);
    settings.set(keys::DEBUG, "true");
    let server = ServerSettings::from_settings(&settings);

    assert_eq!(server.db_port, "6000");
    assert!(server.debug);
    assert!(server.runtime_mode().is_debug());
}
