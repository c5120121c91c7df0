//! Process logger setup for the generated server.
//!
//! Everything in the crate logs through the `log` facade; this installs
//! `env_logger` behind it once, during the connect-storage stage.
use env_logger::Env;

use crate::config::RuntimeMode;

/// Default filter when `RUST_LOG` is not set.
pub fn default_filter(mode: RuntimeMode) -> &'static str {
    match mode {
        RuntimeMode::Debug => "debug",
        RuntimeMode::Release => "info",
    }
}

/// Installs the logger. Returns `false` if a logger was already installed,
/// which is not an error: the existing one keeps receiving records.
pub fn init(mode: RuntimeMode) -> bool {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter(mode)))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
