use std::collections::HashMap;
use std::process::ExitCode;
use std::sync::Arc;

use crate::config::Settings;
use crate::kernel::component::{Collaborators, Layer, LayerKind, Server, ServerRegistration};
use crate::kernel::constants;
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::kernel::shutdown::{self, ShutdownSignal, ShutdownTrigger};
use crate::plugin_system::{Module, ModuleLayer, ModuleRegistry};
use crate::stage_manager::core_stages::{register_core_stages, BOOTSTRAP_PIPELINE};
use crate::stage_manager::{BootstrapPhase, StageContext, StagePipeline, StageRegistry};
use crate::storage::{DriverRegistry, StorageDriver};

/// Main application struct: the collaborators of one bootstrap run.
///
/// `start_server` assembles it from the link-time registries. Embedders and
/// tests build it by hand with the `with_*` methods.
pub struct Application {
    settings: Settings,
    drivers: DriverRegistry,
    modules: ModuleRegistry,
    layers: HashMap<LayerKind, Arc<dyn Layer>>,
    server: Option<Arc<dyn Server>>,
    trigger: ShutdownTrigger,
    signal: ShutdownSignal,
    init_logging: bool,
}

impl Application {
    /// Creates an empty application: no drivers, no modules, no server.
    pub fn new() -> Self {
        let (trigger, signal) = shutdown::channel();
        Self {
            settings: Settings::new(),
            drivers: DriverRegistry::new(),
            modules: ModuleRegistry::new(),
            layers: HashMap::new(),
            server: None,
            trigger,
            signal,
            init_logging: true,
        }
    }

    /// Creates an application from everything registered with
    /// `register_module!`, `register_storage_driver!` and `register_server!`.
    pub fn from_registered() -> Result<Self> {
        let mut app = Self::new();
        app.drivers = DriverRegistry::from_registered()?;
        app.modules = ModuleRegistry::from_registered()?;

        let mut servers = inventory::iter::<ServerRegistration>.into_iter();
        let Some(registration) = servers.next() else {
            return Err(Error::lifecycle(
                KernelLifecyclePhase::Assemble,
                "no server registered; link a crate that calls register_server!",
            ));
        };
        if let Some(extra) = servers.next() {
            return Err(Error::lifecycle(
                KernelLifecyclePhase::Assemble,
                format!(
                    "more than one server registered ({} and {})",
                    registration.origin, extra.origin
                ),
            ));
        }
        let server = (registration.build)();
        log::debug!("Using server '{}' from {}", server.name(), registration.origin);
        app.server = Some(server);
        Ok(app)
    }

    /// Settings propagated from the parent process.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_driver(mut self, driver: Arc<dyn StorageDriver>) -> Result<Self> {
        self.drivers.register(driver)?;
        Ok(self)
    }

    pub fn with_module(mut self, module: Arc<dyn Module>) -> Result<Self> {
        self.modules.register(module)?;
        Ok(self)
    }

    /// Replaces the default module-driven layer of `kind`.
    pub fn with_layer(mut self, kind: LayerKind, layer: Arc<dyn Layer>) -> Self {
        self.layers.insert(kind, layer);
        self
    }

    pub fn with_server(mut self, server: Arc<dyn Server>) -> Self {
        self.server = Some(server);
        self
    }

    /// Whether bootstrap installs the process logger. On by default.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.init_logging = enabled;
        self
    }

    /// Handle that ends the serving loop once the run stage is reached.
    pub fn shutdown_trigger(&self) -> ShutdownTrigger {
        self.trigger.clone()
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// Runs the bootstrap pipeline to completion.
    ///
    /// Returns the phases that ran, which on success is every phase in
    /// order. The first failing phase ends the run with its error.
    pub async fn run(self) -> Result<Vec<BootstrapPhase>> {
        log::info!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);

        let server = self.server.ok_or_else(|| {
            Error::lifecycle(KernelLifecyclePhase::Assemble, "no server configured")
        })?;

        let modules = Arc::new(self.modules);
        let mut layers = self.layers;
        let mut layer_for = |kind: LayerKind| -> Arc<dyn Layer> {
            layers
                .remove(&kind)
                .unwrap_or_else(|| -> Arc<dyn Layer> { Arc::new(ModuleLayer::new(kind, modules.clone())) })
        };
        let collaborators = Collaborators {
            drivers: self.drivers,
            models: layer_for(LayerKind::Models),
            views: layer_for(LayerKind::Views),
            actions: layer_for(LayerKind::Actions),
            controllers: layer_for(LayerKind::Controllers),
            server,
        };
        log::debug!("Collaborators: {:?}", collaborators);

        let mut registry = StageRegistry::new();
        register_core_stages(&mut registry)?;
        let pipeline = StagePipeline::from_definition(&BOOTSTRAP_PIPELINE);

        let mut context = StageContext::new(self.settings, Arc::new(collaborators), self.signal);
        context.set_init_logging(self.init_logging);

        let executed = pipeline.execute(&mut context, &registry).await?;
        Ok(executed
            .iter()
            .filter_map(|id| BootstrapPhase::from_stage_id(id))
            .collect())
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point called by the generated program.
///
/// Applies `settings`, bootstraps everything linked into the binary and
/// serves until Ctrl-C. Any failure is reported on stderr and turns into a
/// failing exit code.
pub fn start_server(settings: Settings) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            let err = Error::runtime(e);
            eprintln!("Fatal: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let result: Result<Vec<BootstrapPhase>> = runtime.block_on(async move {
        let app = Application::from_registered()?.with_settings(settings);
        let trigger = app.shutdown_trigger();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("Interrupt received, shutting down");
                trigger.trigger();
            }
        });
        app.run().await
    });

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Bootstrap aborted: {}", e);
            eprintln!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}
