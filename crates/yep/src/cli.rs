use std::path::PathBuf;
use std::process::{ExitCode, ExitStatus};

use clap::Args;
use yep_core::config::{default_settings, keys, load_settings_file, RuntimeMode, Settings};
use yep_core::generator::{self, DiscoveryMode, Launcher};
use yep_core::logging;
use yep_core::KernelError;

/// Options of `yep server`. Flags that are given override the config file,
/// which overrides the built-in defaults.
#[derive(Args, Debug, Default)]
pub struct ServerArgs {
    /// Project directory, holding the `config` package
    #[arg(default_value = ".")]
    pub project_dir: PathBuf,

    /// Database driver to use [default: postgres]
    #[arg(long, value_name = "DRIVER")]
    pub db_driver: Option<String>,

    /// Database hostname or IP. Leave empty to connect through socket.
    #[arg(long, value_name = "HOST")]
    pub db_host: Option<String>,

    /// Database port [default: 5432]
    #[arg(long, value_name = "PORT")]
    pub db_port: Option<String>,

    /// Database user. Defaults to the current user.
    #[arg(long, value_name = "USER")]
    pub db_user: Option<String>,

    /// Database password. Leave empty when connecting through socket.
    #[arg(long, value_name = "PASSWORD")]
    pub db_password: Option<String>,

    /// Database name [default: yep]
    #[arg(long, value_name = "NAME")]
    pub db_name: Option<String>,

    /// Enable server debug mode for development
    #[arg(long)]
    pub debug: bool,

    /// Configuration file (.json, .yaml, .yml or .toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Generate for a module under test: a missing config package is not an error
    #[arg(long)]
    pub test_module: bool,

    /// Write the start program and exit without running it
    #[arg(long)]
    pub generate_only: bool,
}

impl ServerArgs {
    /// Defaults, then the config file, then the flags that were given.
    pub fn resolve_settings(&self) -> Result<Settings, KernelError> {
        let mut settings = default_settings();
        if let Some(path) = &self.config {
            settings.merge(&load_settings_file(path)?);
        }

        let flags = [
            (keys::DB_DRIVER, &self.db_driver),
            (keys::DB_HOST, &self.db_host),
            (keys::DB_PORT, &self.db_port),
            (keys::DB_USER, &self.db_user),
            (keys::DB_PASSWORD, &self.db_password),
            (keys::DB_NAME, &self.db_name),
        ];
        for (key, value) in flags {
            if let Some(value) = value {
                settings.set(key, value.as_str());
            }
        }
        if self.debug {
            settings.set(keys::DEBUG, true);
        }
        Ok(settings)
    }

    pub fn discovery_mode(&self) -> DiscoveryMode {
        if self.test_module {
            DiscoveryMode::TestModule
        } else {
            DiscoveryMode::Strict
        }
    }
}

/// Runs `yep server`; the exit code is the server's.
pub fn run_server(args: &ServerArgs) -> ExitCode {
    logging::init(RuntimeMode::from_debug_flag(args.debug));

    let launcher = Launcher::new(&args.project_dir);
    let result = args.resolve_settings().and_then(|settings| {
        if args.generate_only {
            let path = generator::generate_start_file(&launcher, &settings, args.discovery_mode())?;
            println!("Generated {}", path.display());
            Ok(None)
        } else {
            generator::generate_and_run(&launcher, &settings, args.discovery_mode()).map(Some)
        }
    });

    match result {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(status)) => exit_code(status),
        Err(e) => {
            log::error!("yep server failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// The child's exit code; 1 when it was killed by a signal.
fn exit_code(status: ExitStatus) -> ExitCode {
    match status.code() {
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        None => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use yep_core::config::SettingValue;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ServerArgs,
    }

    fn parse(argv: &[&str]) -> ServerArgs {
        Wrapper::parse_from(std::iter::once("yep").chain(argv.iter().copied())).args
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = parse(&[]);
        assert_eq!(args.project_dir, PathBuf::from("."));
        assert_eq!(args.discovery_mode(), DiscoveryMode::Strict);
        assert_eq!(args.resolve_settings().unwrap(), default_settings());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse(&["shop", "--db-name", "shop", "--db-port", "6000", "--debug", "--test-module"]);
        let settings = args.resolve_settings().unwrap();

        assert_eq!(args.project_dir, PathBuf::from("shop"));
        assert_eq!(args.discovery_mode(), DiscoveryMode::TestModule);
        assert_eq!(settings.get_string(keys::DB_NAME).as_deref(), Some("shop"));
        assert_eq!(settings.get_string(keys::DB_PORT).as_deref(), Some("6000"));
        assert_eq!(settings.get(keys::DEBUG), Some(&SettingValue::Bool(true)));
        assert_eq!(settings.get_string(keys::DB_DRIVER).as_deref(), Some("postgres"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yep.json");
        std::fs::write(&path, r#"{"Server": {"DBName": "from_file", "DBUser": "alice"}}"#).unwrap();

        let args = parse(&["--config", path.to_str().unwrap(), "--db-name", "from_flag"]);
        let settings = args.resolve_settings().unwrap();

        assert_eq!(settings.get_string(keys::DB_NAME).as_deref(), Some("from_flag"));
        assert_eq!(settings.get_string(keys::DB_USER).as_deref(), Some("alice"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = parse(&["--config", "/nonexistent/yep.json"]);
        assert!(args.resolve_settings().is_err());
    }
}
