use std::sync::Arc;

use crate::config::{RuntimeMode, Settings};
use crate::kernel::component::{Collaborators, LayerContext};
use crate::kernel::shutdown::ShutdownSignal;
use crate::stage_manager::error::StageSystemError;
use crate::storage::Connection;

pub const PROPAGATED_SETTINGS_KEY: &str = "propagated_settings";
pub const SETTINGS_KEY: &str = "settings";
pub const RUNTIME_MODE_KEY: &str = "runtime_mode";
pub const CONNECTION_KEY: &str = "connection";
pub const SHUTDOWN_KEY: &str = "shutdown";

/// State threaded through the bootstrap stages.
///
/// Filled in as the pipeline advances: the connect-storage stage consumes the
/// propagated settings and leaves behind the frozen settings, the runtime mode
/// and the connection; every later stage reads those. Accessors fail with
/// [`StageSystemError::ContextError`] when a stage runs before its inputs exist.
pub struct StageContext {
    propagated: Option<Settings>,
    settings: Option<Arc<Settings>>,
    mode: Option<RuntimeMode>,
    connection: Option<Arc<dyn Connection>>,
    collaborators: Arc<Collaborators>,
    shutdown: Option<ShutdownSignal>,
    init_logging: bool,
    completed: Vec<String>,
}

impl StageContext {
    pub fn new(
        propagated: Settings,
        collaborators: Arc<Collaborators>,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            propagated: Some(propagated),
            settings: None,
            mode: None,
            connection: None,
            collaborators,
            shutdown: Some(shutdown),
            init_logging: true,
            completed: Vec::new(),
        }
    }

    /// Whether the connect-storage stage installs the process logger.
    pub fn set_init_logging(&mut self, enabled: bool) {
        self.init_logging = enabled;
    }

    pub fn init_logging(&self) -> bool {
        self.init_logging
    }

    pub fn collaborators(&self) -> &Arc<Collaborators> {
        &self.collaborators
    }

    /// Hands the propagated settings to the stage applying them. Works once.
    pub fn take_propagated_settings(&mut self) -> Result<Settings, StageSystemError> {
        self.propagated.take().ok_or_else(|| missing(PROPAGATED_SETTINGS_KEY, "already applied"))
    }

    pub fn set_settings(&mut self, settings: Arc<Settings>) {
        self.settings = Some(settings);
    }

    pub fn settings(&self) -> Result<&Arc<Settings>, StageSystemError> {
        self.settings.as_ref().ok_or_else(|| missing(SETTINGS_KEY, "settings not applied yet"))
    }

    pub fn set_runtime_mode(&mut self, mode: RuntimeMode) {
        self.mode = Some(mode);
    }

    pub fn runtime_mode(&self) -> Result<RuntimeMode, StageSystemError> {
        self.mode.ok_or_else(|| missing(RUNTIME_MODE_KEY, "runtime mode not chosen yet"))
    }

    pub fn set_connection(&mut self, connection: Arc<dyn Connection>) {
        self.connection = Some(connection);
    }

    pub fn connection(&self) -> Result<&Arc<dyn Connection>, StageSystemError> {
        self.connection.as_ref().ok_or_else(|| missing(CONNECTION_KEY, "storage not connected yet"))
    }

    /// Hands the shutdown signal to the serving stage. Works once.
    pub fn take_shutdown(&mut self) -> Result<ShutdownSignal, StageSystemError> {
        self.shutdown.take().ok_or_else(|| missing(SHUTDOWN_KEY, "already handed to the server"))
    }

    /// Borrowed view given to layers and the server.
    pub fn layer_context(&self) -> Result<LayerContext<'_>, StageSystemError> {
        Ok(LayerContext {
            settings: self.settings()?,
            connection: self.connection()?,
            mode: self.runtime_mode()?,
        })
    }

    pub fn record_completed(&mut self, stage_id: &str) {
        self.completed.push(stage_id.to_string());
    }

    /// Stages that finished successfully, in execution order.
    pub fn completed_stages(&self) -> &[String] {
        &self.completed
    }
}

fn missing(key: &str, reason: &str) -> StageSystemError {
    StageSystemError::ContextError {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
