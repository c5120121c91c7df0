/// Application name
pub const APP_NAME: &str = "YEP";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the framework crate as seen from generated code
pub const CORE_CRATE_NAME: &str = "yep_core";

/// Directory of the configuration package, relative to the project directory
pub const CONFIG_PACKAGE_DIR: &str = "config";

/// Manifest of the configuration package
pub const CONFIG_MANIFEST_NAME: &str = "Cargo.toml";

/// Binary target name of the generated entry point
pub const START_BIN_NAME: &str = "yep_start";

/// Generated entry point, relative to the project directory
pub const START_FILE_PATH: &str = "config/src/bin/yep_start.rs";

/// Toolchain used when `CARGO` is not set
pub const DEFAULT_TOOLCHAIN: &str = "cargo";

/// Environment variable naming the toolchain executable
pub const TOOLCHAIN_ENV: &str = "CARGO";
