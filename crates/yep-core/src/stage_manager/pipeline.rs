use crate::kernel::error::Result;
use crate::stage_manager::error::StageSystemError;
use crate::stage_manager::registry::StageRegistry;
use crate::stage_manager::StageContext;

/// Represents a static definition of a pipeline.
/// Used for defining constant pipelines that can be easily referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDefinition {
    /// The unique identifier name for the pipeline.
    pub name: &'static str,
    /// An ordered slice of stage IDs included in this pipeline.
    pub stages: &'static [&'static str],
    /// An optional description of the pipeline's purpose.
    pub description: Option<&'static str>,
}

/// Ordered, fail-fast stage execution
#[derive(Debug, Clone)]
pub struct StagePipeline {
    /// Name of the pipeline
    name: String,
    /// Description of what this pipeline does
    description: String,
    /// Ordered list of stage IDs to execute
    stages: Vec<String>,
}

impl StagePipeline {
    /// Create a new stage pipeline
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            stages: Vec::new(),
        }
    }

    /// Build a pipeline from a constant definition
    pub fn from_definition(definition: &PipelineDefinition) -> Self {
        let mut pipeline = Self::new(definition.name, definition.description.unwrap_or(""));
        pipeline.add_stages(definition.stages);
        pipeline
    }

    /// Add a stage ID to the pipeline; a stage appears at most once
    pub fn add_stage(&mut self, stage_id: &str) {
        if !self.stages.iter().any(|s| s == stage_id) {
            self.stages.push(stage_id.to_string());
        }
    }

    /// Add multiple stage IDs to the pipeline
    pub fn add_stages(&mut self, stage_ids: &[&str]) {
        for stage_id in stage_ids {
            self.add_stage(stage_id);
        }
    }

    /// Check that every stage exists in the registry
    pub fn validate(&self, registry: &StageRegistry) -> Result<()> {
        for stage_id in &self.stages {
            if !registry.has_stage(stage_id) {
                return Err(StageSystemError::StageNotFoundInPipelineValidation {
                    pipeline_name: self.name.clone(),
                    stage_id: stage_id.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Execute every stage in order.
    ///
    /// Validation happens before the first stage runs. The first failing stage
    /// ends the run: nothing after it executes and its error is returned.
    /// Returns the ids of the executed stages.
    pub async fn execute(&self, context: &mut StageContext, registry: &StageRegistry) -> Result<Vec<String>> {
        log::info!("Executing pipeline: {}", self.name);
        log::debug!("Description: {}", self.description);

        self.validate(registry)?;

        let mut executed = Vec::with_capacity(self.stages.len());
        for stage_id in &self.stages {
            registry.execute_stage(stage_id, context).await?;
            context.record_completed(stage_id);
            executed.push(stage_id.clone());
        }

        Ok(executed)
    }

    /// Get the name of the pipeline
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description of the pipeline
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the stages in the pipeline
    pub fn stages(&self) -> &[String] {
        &self.stages
    }
}
