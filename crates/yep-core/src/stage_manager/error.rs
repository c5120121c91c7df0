//! # YEP Core Stage Manager Errors
//!
//! Defines error types specific to the stage pipeline that drives the
//! bootstrap: stage registration, pipeline validation, context access and the
//! fail-fast wrapper around a failing stage.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageSystemError {
    #[error("Stage '{stage_id}' not found")]
    StageNotFound { stage_id: String },

    #[error("Stage '{stage_id}' already exists in the registry")]
    StageAlreadyExists { stage_id: String },

    #[error("Pipeline '{pipeline_name}' validation: Stage '{stage_id}' not found in registry")]
    StageNotFoundInPipelineValidation { pipeline_name: String, stage_id: String },

    #[error("Stage execution failed for stage '{stage_id}': {source}")]
    StageExecutionFailed {
        stage_id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Error accessing data from StageContext: Key '{key}' - {reason}")]
    ContextError { key: String, reason: String },
}
