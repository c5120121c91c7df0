//! # YEP Core Stage Manager
//!
//! The bootstrap sequence is a pipeline of stages, one per
//! [`BootstrapPhase`]. Stages are registered in a [`StageRegistry`] by id and
//! a [`StagePipeline`] runs them strictly in order against a shared
//! [`StageContext`]; the first failing stage stops the pipeline.
pub mod context;
pub mod core_stages;
pub mod error;
pub mod phase;
pub mod pipeline;
pub mod registry;

use crate::kernel::error::Result;
use async_trait::async_trait;

/// Core trait that all stages must implement
#[async_trait]
pub trait Stage: Send + Sync {
    /// The unique identifier of the stage
    fn id(&self) -> &str;

    /// The human-readable name of the stage
    fn name(&self) -> &str;

    /// The description of what this stage does
    fn description(&self) -> &str;

    /// Execute the stage with the given context
    async fn execute(&self, context: &mut context::StageContext) -> Result<()>;
}

// Re-export important types
pub use context::StageContext;
pub use phase::BootstrapPhase;
pub use pipeline::{PipelineDefinition, StagePipeline};
pub use registry::StageRegistry;
