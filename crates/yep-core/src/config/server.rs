use crate::config::settings::Settings;

/// Recognized `Server.*` keys.
pub mod keys {
    pub const DB_DRIVER: &str = "Server.DBDriver";
    pub const DB_HOST: &str = "Server.DBHost";
    pub const DB_PORT: &str = "Server.DBPort";
    pub const DB_USER: &str = "Server.DBUser";
    pub const DB_PASSWORD: &str = "Server.DBPassword";
    pub const DB_NAME: &str = "Server.DBName";
    pub const DEBUG: &str = "Server.Debug";
}

pub const DEFAULT_DB_DRIVER: &str = "postgres";
pub const DEFAULT_DB_PORT: &str = "5432";
pub const DEFAULT_DB_NAME: &str = "yep";

/// Defaults of every recognized key.
pub fn default_settings() -> Settings {
    let mut settings = Settings::new();
    settings.set(keys::DB_DRIVER, DEFAULT_DB_DRIVER);
    settings.set(keys::DB_HOST, "");
    settings.set(keys::DB_PORT, DEFAULT_DB_PORT);
    settings.set(keys::DB_USER, "");
    settings.set(keys::DB_PASSWORD, "");
    settings.set(keys::DB_NAME, DEFAULT_DB_NAME);
    settings.set(keys::DEBUG, false);
    settings
}

/// Development or production behaviour of the serving layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Debug,
    Release,
}

impl RuntimeMode {
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug { RuntimeMode::Debug } else { RuntimeMode::Release }
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, RuntimeMode::Debug)
    }
}

/// Typed view of the `Server.*` settings, defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub db_driver: String,
    pub db_host: String,
    pub db_port: String,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub debug: bool,
}

impl ServerSettings {
    pub fn from_settings(settings: &Settings) -> Self {
        let string_or = |key: &str, default: &str| {
            settings.get_string(key).unwrap_or_else(|| default.to_string())
        };
        Self {
            db_driver: string_or(keys::DB_DRIVER, DEFAULT_DB_DRIVER),
            db_host: string_or(keys::DB_HOST, ""),
            db_port: string_or(keys::DB_PORT, DEFAULT_DB_PORT),
            db_user: string_or(keys::DB_USER, ""),
            db_password: string_or(keys::DB_PASSWORD, ""),
            db_name: string_or(keys::DB_NAME, DEFAULT_DB_NAME),
            debug: settings.get_bool(keys::DEBUG).unwrap_or(false),
        }
    }

    pub fn runtime_mode(&self) -> RuntimeMode {
        RuntimeMode::from_debug_flag(self.debug)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self::from_settings(&default_settings())
    }
}
