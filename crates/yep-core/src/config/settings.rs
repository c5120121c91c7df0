use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// A single configuration value.
///
/// Deserializes from any scalar: integers that fit `i64` stay integers, other
/// numbers become floats.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl SettingValue {
    /// Textual form, the way a configuration library would cast it.
    pub fn as_string(&self) -> String {
        match self {
            SettingValue::Bool(b) => b.to_string(),
            SettingValue::Integer(i) => i.to_string(),
            SettingValue::Float(f) => f.to_string(),
            SettingValue::String(s) => s.clone(),
        }
    }

    /// Boolean form; `None` when the value has no sensible boolean reading.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            SettingValue::Integer(i) => Some(*i != 0),
            SettingValue::Float(_) => None,
            SettingValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "t" | "yes" | "on" => Some(true),
                "false" | "0" | "f" | "no" | "off" | "" => Some(false),
                _ => None,
            },
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        SettingValue::Integer(value.into())
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}

/// Dotted-key settings (`Server.DBName`), sorted by key.
///
/// Keys are case-sensitive. The sorted order is what makes the generated
/// settings literal deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: BTreeMap<String, SettingValue>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// String reading of `key`, if present.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).map(SettingValue::as_string)
    }

    /// Boolean reading of `key`, if present and convertible.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(SettingValue::as_bool)
    }

    /// Sets `key`, returning the value it replaces.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Option<SettingValue> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<SettingValue> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds settings from key/value pairs; a later pair wins over an earlier one.
    ///
    /// Generated entry points call this, so it does not depend on any trait
    /// being in scope.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SettingValue)>,
    {
        Self {
            values: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Overrides existing values with those of `other`.
    pub fn merge(&mut self, other: &Settings) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }
}

impl<K: Into<String>> FromIterator<(K, SettingValue)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, SettingValue)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl<'a> IntoIterator for &'a Settings {
    type Item = (&'a String, &'a SettingValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// The child-side settings store.
///
/// Starts from the server defaults; `apply` installs every propagated pair,
/// overwriting what was there. `freeze` ends the write phase: later stages
/// only ever see the returned immutable `Arc<Settings>`.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    values: Settings,
}

impl SettingsStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            values: Settings::new(),
        }
    }

    /// A store holding the defaults of every recognized `Server.*` key.
    pub fn with_defaults() -> Self {
        Self {
            values: crate::config::server::default_settings(),
        }
    }

    /// Installs every pair of `settings`. Nothing is validated here.
    pub fn apply(&mut self, settings: &Settings) {
        for (key, value) in settings {
            log::trace!("Applying setting {key}");
            self.values.set(key.clone(), value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    pub fn freeze(self) -> Arc<Settings> {
        Arc::new(self.values)
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
