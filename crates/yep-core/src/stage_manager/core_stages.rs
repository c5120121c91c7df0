use async_trait::async_trait;

use crate::config::{ServerSettings, SettingsStore};
use crate::kernel::component::LayerKind;
use crate::kernel::error::Result;
use crate::logging;
use crate::stage_manager::error::StageSystemError;
use crate::stage_manager::pipeline::PipelineDefinition;
use crate::stage_manager::registry::StageRegistry;
use crate::stage_manager::{BootstrapPhase, Stage, StageContext};
use crate::storage::ConnectionDescriptor;

/// The bootstrap sequence, in its fixed order.
pub const BOOTSTRAP_PIPELINE: PipelineDefinition = PipelineDefinition {
    name: "bootstrap",
    stages: &[
        BootstrapPhase::ConnectStorage.stage_id(),
        BootstrapPhase::BootstrapModels.stage_id(),
        BootstrapPhase::LoadInternalResources.stage_id(),
        BootstrapPhase::BootstrapViews.stage_id(),
        BootstrapPhase::BootstrapActions.stage_id(),
        BootstrapPhase::BootstrapControllers.stage_id(),
        BootstrapPhase::PostInit.stage_id(),
        BootstrapPhase::Run.stage_id(),
    ],
    description: Some("Connect storage, finalize every layer, then serve"),
};

/// Registers one stage per bootstrap phase.
pub fn register_core_stages(registry: &mut StageRegistry) -> std::result::Result<(), StageSystemError> {
    registry.register_stage(Box::new(ConnectStorageStage))?;
    registry.register_stage(Box::new(LayerBootstrapStage::new(LayerKind::Models)))?;
    registry.register_stage(Box::new(LoadInternalResourcesStage))?;
    registry.register_stage(Box::new(LayerBootstrapStage::new(LayerKind::Views)))?;
    registry.register_stage(Box::new(LayerBootstrapStage::new(LayerKind::Actions)))?;
    registry.register_stage(Box::new(LayerBootstrapStage::new(LayerKind::Controllers)))?;
    registry.register_stage(Box::new(PostInitStage))?;
    registry.register_stage(Box::new(RunStage))?;
    Ok(())
}

/// Applies the propagated settings, sets up logging and opens storage.
#[derive(Debug)]
pub struct ConnectStorageStage;

#[async_trait]
impl Stage for ConnectStorageStage {
    fn id(&self) -> &str { BootstrapPhase::ConnectStorage.stage_id() }
    fn name(&self) -> &str { BootstrapPhase::ConnectStorage.name() }
    fn description(&self) -> &str { "Applies settings, initializes logging and connects to the database." }

    async fn execute(&self, context: &mut StageContext) -> Result<()> {
        let propagated = context.take_propagated_settings()?;
        let mut store = SettingsStore::with_defaults();
        store.apply(&propagated);
        let settings = store.freeze();

        let server = ServerSettings::from_settings(&settings);
        let mode = server.runtime_mode();
        context.set_settings(settings);
        context.set_runtime_mode(mode);

        if context.init_logging() {
            logging::init(mode);
        }
        log::debug!("Runtime mode: {:?}", mode);

        let descriptor = ConnectionDescriptor::from_settings(&server);
        log::info!("Connecting to '{}' database: {}", descriptor.driver(), descriptor);
        let connection = context.collaborators().drivers.connect(&descriptor).await?;
        context.set_connection(connection);
        Ok(())
    }
}

/// Finalizes one of the model, view, action or controller layers.
#[derive(Debug)]
pub struct LayerBootstrapStage {
    kind: LayerKind,
    phase: BootstrapPhase,
}

impl LayerBootstrapStage {
    pub fn new(kind: LayerKind) -> Self {
        let phase = match kind {
            LayerKind::Models => BootstrapPhase::BootstrapModels,
            LayerKind::Views => BootstrapPhase::BootstrapViews,
            LayerKind::Actions => BootstrapPhase::BootstrapActions,
            LayerKind::Controllers => BootstrapPhase::BootstrapControllers,
        };
        Self { kind, phase }
    }
}

#[async_trait]
impl Stage for LayerBootstrapStage {
    fn id(&self) -> &str { self.phase.stage_id() }
    fn name(&self) -> &str { self.phase.name() }
    fn description(&self) -> &str { "Finalizes the contributions of every module to one layer." }

    async fn execute(&self, context: &mut StageContext) -> Result<()> {
        let layer = context.collaborators().layer(self.kind).clone();
        let ctx = context.layer_context()?;
        log::debug!("Bootstrapping {} with layer '{}'", self.kind, layer.name());
        layer.bootstrap(&ctx).await
    }
}

/// Loads the resources owned by the serving layer itself.
#[derive(Debug)]
pub struct LoadInternalResourcesStage;

#[async_trait]
impl Stage for LoadInternalResourcesStage {
    fn id(&self) -> &str { BootstrapPhase::LoadInternalResources.stage_id() }
    fn name(&self) -> &str { BootstrapPhase::LoadInternalResources.name() }
    fn description(&self) -> &str { "Loads resources owned by the server before views and actions." }

    async fn execute(&self, context: &mut StageContext) -> Result<()> {
        let server = context.collaborators().server.clone();
        let ctx = context.layer_context()?;
        server.load_internal_resources(&ctx).await
    }
}

/// Cross-cutting fix-ups once every layer is finalized.
#[derive(Debug)]
pub struct PostInitStage;

#[async_trait]
impl Stage for PostInitStage {
    fn id(&self) -> &str { BootstrapPhase::PostInit.stage_id() }
    fn name(&self) -> &str { BootstrapPhase::PostInit.name() }
    fn description(&self) -> &str { "Resolves references that need every layer loaded." }

    async fn execute(&self, context: &mut StageContext) -> Result<()> {
        let server = context.collaborators().server.clone();
        let ctx = context.layer_context()?;
        server.post_init(&ctx).await
    }
}

/// Serves until shutdown is requested.
#[derive(Debug)]
pub struct RunStage;

#[async_trait]
impl Stage for RunStage {
    fn id(&self) -> &str { BootstrapPhase::Run.stage_id() }
    fn name(&self) -> &str { BootstrapPhase::Run.name() }
    fn description(&self) -> &str { "Starts the server; returns when it is shut down." }

    async fn execute(&self, context: &mut StageContext) -> Result<()> {
        let server = context.collaborators().server.clone();
        let shutdown = context.take_shutdown()?;
        let ctx = context.layer_context()?;
        log::info!("YEP is up and running");
        server.run(&ctx, shutdown).await?;
        log::info!("Server '{}' stopped", server.name());
        Ok(())
    }
}
