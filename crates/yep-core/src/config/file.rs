use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::config::error::ConfigError;
use crate::config::settings::{SettingValue, Settings};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }

    fn parse(&self, data: &str) -> Result<Value, Box<dyn std::error::Error + Send + Sync + 'static>> {
        match self {
            ConfigFormat::Json => Ok(serde_json::from_str(data)?),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => Ok(serde_yaml::from_str(data)?),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => Ok(toml::from_str(data)?),
        }
    }
}

/// Loads a configuration file into dotted-key settings.
///
/// Nested tables become key prefixes, so `[Server] DBName = "x"` in TOML
/// yields `Server.DBName`. Null values are ignored; arrays are rejected.
pub fn load_settings_file(path: &Path) -> Result<Settings, ConfigError> {
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&content, format).map_err(|err| match err {
        ConfigError::Deserialization { format, source, .. } => ConfigError::Deserialization {
            format,
            path: path.to_path_buf(),
            source,
        },
        ConfigError::NotATable(_) => ConfigError::NotATable(path.to_path_buf()),
        other => other,
    })
}

/// Parses configuration text of the given format into settings.
pub fn parse_settings(data: &str, format: ConfigFormat) -> Result<Settings, ConfigError> {
    let value = format.parse(data).map_err(|source| ConfigError::Deserialization {
        format: format.extension().to_string(),
        path: Default::default(),
        source,
    })?;

    let Value::Object(root) = value else {
        return Err(ConfigError::NotATable(Default::default()));
    };

    let mut settings = Settings::new();
    for (key, value) in root {
        flatten_into(&mut settings, key, value)?;
    }
    Ok(settings)
}

fn flatten_into(settings: &mut Settings, key: String, value: Value) -> Result<(), ConfigError> {
    match value {
        Value::Null => {}
        Value::Object(table) => {
            for (child, value) in table {
                flatten_into(settings, format!("{key}.{child}"), value)?;
            }
        }
        Value::Array(_) => {
            return Err(ConfigError::UnsupportedValue {
                key,
                kind: "array".to_string(),
            });
        }
        scalar => {
            let value = SettingValue::deserialize(scalar).map_err(|e| ConfigError::UnsupportedValue {
                key: key.clone(),
                kind: e.to_string(),
            })?;
            settings.set(key, value);
        }
    }
    Ok(())
}
