use std::fmt::{self, Debug};
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{RuntimeMode, Settings};
use crate::kernel::error::Result;
use crate::kernel::shutdown::ShutdownSignal;
use crate::storage::{Connection, DriverRegistry};

/// The four layers finalized from module contributions, in bootstrap order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Models,
    Views,
    Actions,
    Controllers,
}

impl LayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Models => "models",
            LayerKind::Views => "views",
            LayerKind::Actions => "actions",
            LayerKind::Controllers => "controllers",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What every collaborator sees once storage is connected.
#[derive(Clone, Copy)]
pub struct LayerContext<'a> {
    pub settings: &'a Settings,
    pub connection: &'a Arc<dyn Connection>,
    pub mode: RuntimeMode,
}

impl Debug for LayerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerContext")
            .field("settings", &self.settings.len())
            .field("driver", &self.connection.driver())
            .field("mode", &self.mode)
            .finish()
    }
}

/// Lifecycle contract of the model, view, action and controller layers.
///
/// `bootstrap` is called exactly once, after storage is connected and after
/// every earlier layer has been finalized.
#[async_trait]
pub trait Layer: Send + Sync {
    fn name(&self) -> &str;
    async fn bootstrap(&self, ctx: &LayerContext<'_>) -> Result<()>;
}

/// Lifecycle contract of the serving layer.
#[async_trait]
pub trait Server: Send + Sync {
    fn name(&self) -> &str;

    /// Loads resources owned by the server itself, before views and actions.
    async fn load_internal_resources(&self, ctx: &LayerContext<'_>) -> Result<()>;

    /// Cross-cutting fix-ups once every layer is finalized.
    async fn post_init(&self, ctx: &LayerContext<'_>) -> Result<()>;

    /// Serves until `shutdown` fires. Returning early with `Ok` ends the process normally.
    async fn run(&self, ctx: &LayerContext<'_>, shutdown: ShutdownSignal) -> Result<()>;
}

/// Builds a fresh server instance; used by `register_server!`.
pub type ServerFactory = fn() -> Arc<dyn Server>;

/// Link-time registration of the serving layer.
pub struct ServerRegistration {
    pub origin: &'static str,
    pub build: ServerFactory,
}

impl ServerRegistration {
    pub const fn new(origin: &'static str, build: ServerFactory) -> Self {
        Self { origin, build }
    }
}

inventory::collect!(ServerRegistration);

/// Registers the serving layer of the application.
///
/// ```ignore
/// yep_core::register_server!(HttpServer::default());
/// ```
#[macro_export]
macro_rules! register_server {
    ($server:expr) => {
        $crate::__private::inventory::submit! {
            $crate::kernel::component::ServerRegistration::new(
                ::core::module_path!(),
                || -> ::std::sync::Arc<dyn $crate::kernel::component::Server> {
                    ::std::sync::Arc::new($server)
                },
            )
        }
    };
}

/// Every collaborator the bootstrap sequence talks to.
pub struct Collaborators {
    pub drivers: DriverRegistry,
    pub models: Arc<dyn Layer>,
    pub views: Arc<dyn Layer>,
    pub actions: Arc<dyn Layer>,
    pub controllers: Arc<dyn Layer>,
    pub server: Arc<dyn Server>,
}

impl Collaborators {
    pub fn layer(&self, kind: LayerKind) -> &Arc<dyn Layer> {
        match kind {
            LayerKind::Models => &self.models,
            LayerKind::Views => &self.views,
            LayerKind::Actions => &self.actions,
            LayerKind::Controllers => &self.controllers,
        }
    }
}

impl Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators")
            .field("drivers", &self.drivers)
            .field("models", &self.models.name())
            .field("views", &self.views.name())
            .field("actions", &self.actions.name())
            .field("controllers", &self.controllers.name())
            .field("server", &self.server.name())
            .finish()
    }
}
