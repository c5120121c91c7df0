#![cfg(test)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{keys, Settings};
use crate::kernel::component::{Collaborators, Layer, LayerContext, Server};
use crate::kernel::error::{Error, Result};
use crate::kernel::shutdown::{self, ShutdownSignal, ShutdownTrigger};
use crate::plugin_system::Module;
use crate::stage_manager::StageContext;
use crate::storage::{Connection, ConnectionDescriptor, DriverError, DriverRegistry, StorageDriver};

// ===== JOURNAL =====

/// Shared, ordered record of every collaborator call.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }
}

// ===== STORAGE =====

#[derive(Debug)]
pub struct MemoryConnection {
    pub dsn: String,
}

impl Connection for MemoryConnection {
    fn driver(&self) -> &str {
        "memory"
    }
}

/// Driver named `memory`; records the descriptor it was given.
pub struct MemoryDriver {
    journal: Journal,
    fail_with: Option<String>,
}

impl MemoryDriver {
    pub fn new(journal: Journal) -> Self {
        Self { journal, fail_with: None }
    }

    pub fn failing(journal: Journal, message: &str) -> Self {
        Self {
            journal,
            fail_with: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl StorageDriver for MemoryDriver {
    fn name(&self) -> &str {
        "memory"
    }

    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> std::result::Result<Arc<dyn Connection>, DriverError> {
        self.journal.record(format!("connect:{}", descriptor.as_str()));
        if let Some(message) = &self.fail_with {
            return Err(message.clone().into());
        }
        Ok(Arc::new(MemoryConnection {
            dsn: descriptor.as_str().to_string(),
        }))
    }
}

/// Settings selecting the in-memory driver.
pub fn memory_settings() -> Settings {
    let mut settings = Settings::new();
    settings.set(keys::DB_DRIVER, "memory");
    settings.set(keys::DB_NAME, "testdb");
    settings
}

// ===== LAYERS =====

pub struct RecordingLayer {
    name: String,
    journal: Journal,
    fail: bool,
}

impl RecordingLayer {
    pub fn new(name: &str, journal: Journal) -> Self {
        Self {
            name: name.to_string(),
            journal,
            fail: false,
        }
    }

    pub fn failing(name: &str, journal: Journal) -> Self {
        Self {
            fail: true,
            ..Self::new(name, journal)
        }
    }
}

#[async_trait]
impl Layer for RecordingLayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn bootstrap(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        self.journal.record(self.name.clone());
        if self.fail {
            return Err(Error::collaborator(&self.name, "refused to bootstrap"));
        }
        Ok(())
    }
}

// ===== SERVER =====

/// Server that records its lifecycle calls and serves until shutdown.
pub struct RecordingServer {
    journal: Journal,
}

impl RecordingServer {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

#[async_trait]
impl Server for RecordingServer {
    fn name(&self) -> &str {
        "recording"
    }

    async fn load_internal_resources(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        self.journal.record("internal_resources");
        Ok(())
    }

    async fn post_init(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        self.journal.record("post_init");
        Ok(())
    }

    async fn run(&self, ctx: &LayerContext<'_>, mut shutdown: ShutdownSignal) -> Result<()> {
        self.journal.record(format!("run:{}", ctx.connection.driver()));
        shutdown.wait().await;
        self.journal.record("stopped");
        Ok(())
    }
}

// ===== MODULES =====

pub struct RecordingModule {
    name: String,
    journal: Journal,
    fail_views: bool,
}

impl RecordingModule {
    pub fn new(name: &str, journal: Journal) -> Self {
        Self {
            name: name.to_string(),
            journal,
            fail_views: false,
        }
    }

    pub fn failing_views(name: &str, journal: Journal) -> Self {
        Self {
            fail_views: true,
            ..Self::new(name, journal)
        }
    }
}

impl Module for RecordingModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn bootstrap_models(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        self.journal.record(format!("{}:models", self.name));
        Ok(())
    }

    fn bootstrap_views(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        self.journal.record(format!("{}:views", self.name));
        if self.fail_views {
            return Err(Error::collaborator(&self.name, "bad view definition"));
        }
        Ok(())
    }

    fn bootstrap_actions(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        self.journal.record(format!("{}:actions", self.name));
        Ok(())
    }

    fn bootstrap_controllers(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        self.journal.record(format!("{}:controllers", self.name));
        Ok(())
    }
}

// ===== CONTEXT =====

/// Collaborators backed by recording layers named after their kind.
pub fn recording_collaborators(journal: &Journal) -> Collaborators {
    let mut drivers = DriverRegistry::new();
    drivers
        .register(Arc::new(MemoryDriver::new(journal.clone())))
        .unwrap();
    Collaborators {
        drivers,
        models: Arc::new(RecordingLayer::new("models", journal.clone())),
        views: Arc::new(RecordingLayer::new("views", journal.clone())),
        actions: Arc::new(RecordingLayer::new("actions", journal.clone())),
        controllers: Arc::new(RecordingLayer::new("controllers", journal.clone())),
        server: Arc::new(RecordingServer::new(journal.clone())),
    }
}

/// A stage context over `collaborators`, logging setup disabled.
pub fn stage_context(settings: Settings, collaborators: Collaborators) -> (StageContext, ShutdownTrigger) {
    let (trigger, signal) = shutdown::channel();
    let mut context = StageContext::new(settings, Arc::new(collaborators), signal);
    context.set_init_logging(false);
    (context, trigger)
}
