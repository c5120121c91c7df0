use std::fmt;

use crate::kernel::component::LayerKind;

/// The bootstrap phases, in the only order they ever run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BootstrapPhase {
    ConnectStorage,
    BootstrapModels,
    LoadInternalResources,
    BootstrapViews,
    BootstrapActions,
    BootstrapControllers,
    PostInit,
    Run,
}

impl BootstrapPhase {
    pub const ALL: [BootstrapPhase; 8] = [
        BootstrapPhase::ConnectStorage,
        BootstrapPhase::BootstrapModels,
        BootstrapPhase::LoadInternalResources,
        BootstrapPhase::BootstrapViews,
        BootstrapPhase::BootstrapActions,
        BootstrapPhase::BootstrapControllers,
        BootstrapPhase::PostInit,
        BootstrapPhase::Run,
    ];

    /// Identifier of the stage implementing this phase.
    pub const fn stage_id(&self) -> &'static str {
        match self {
            BootstrapPhase::ConnectStorage => "core::connect_storage",
            BootstrapPhase::BootstrapModels => "core::bootstrap_models",
            BootstrapPhase::LoadInternalResources => "core::load_internal_resources",
            BootstrapPhase::BootstrapViews => "core::bootstrap_views",
            BootstrapPhase::BootstrapActions => "core::bootstrap_actions",
            BootstrapPhase::BootstrapControllers => "core::bootstrap_controllers",
            BootstrapPhase::PostInit => "core::post_init",
            BootstrapPhase::Run => "core::run",
        }
    }

    pub fn from_stage_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.stage_id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BootstrapPhase::ConnectStorage => "Connect Storage",
            BootstrapPhase::BootstrapModels => "Bootstrap Models",
            BootstrapPhase::LoadInternalResources => "Load Internal Resources",
            BootstrapPhase::BootstrapViews => "Bootstrap Views",
            BootstrapPhase::BootstrapActions => "Bootstrap Actions",
            BootstrapPhase::BootstrapControllers => "Bootstrap Controllers",
            BootstrapPhase::PostInit => "Post Init",
            BootstrapPhase::Run => "Run",
        }
    }

    /// The layer finalized by this phase, if it is a layer phase.
    pub fn layer(&self) -> Option<LayerKind> {
        match self {
            BootstrapPhase::BootstrapModels => Some(LayerKind::Models),
            BootstrapPhase::BootstrapViews => Some(LayerKind::Views),
            BootstrapPhase::BootstrapActions => Some(LayerKind::Actions),
            BootstrapPhase::BootstrapControllers => Some(LayerKind::Controllers),
            _ => None,
        }
    }
}

impl fmt::Display for BootstrapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
