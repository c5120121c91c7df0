use std::fmt;

use indexmap::IndexMap;

use crate::stage_manager::error::StageSystemError;
use crate::stage_manager::{Stage, StageContext};

/// Registry for managing stages
pub struct StageRegistry {
    /// Registered stages by ID, in registration order
    stages: IndexMap<String, Box<dyn Stage>>,
}

// Manual Debug implementation
impl fmt::Debug for StageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage_ids: Vec<&String> = self.stages.keys().collect();
        f.debug_struct("StageRegistry")
            .field("stages", &stage_ids)
            .finish()
    }
}

impl StageRegistry {
    /// Create a new stage registry
    pub fn new() -> Self {
        Self {
            stages: IndexMap::new(),
        }
    }

    /// Register a stage
    pub fn register_stage(&mut self, stage: Box<dyn Stage>) -> Result<(), StageSystemError> {
        let id = stage.id().to_string();

        if self.stages.contains_key(&id) {
            return Err(StageSystemError::StageAlreadyExists { stage_id: id });
        }

        self.stages.insert(id, stage);
        Ok(())
    }

    /// Check if a stage with the given ID exists
    pub fn has_stage(&self, id: &str) -> bool {
        self.stages.contains_key(id)
    }

    /// Get all registered stage IDs
    pub fn get_all_ids(&self) -> Vec<String> {
        self.stages.keys().cloned().collect()
    }

    /// Get the number of registered stages
    pub fn count(&self) -> usize {
        self.stages.len()
    }

    /// Execute a specific stage. A stage error is wrapped with the stage id.
    pub async fn execute_stage(&self, id: &str, context: &mut StageContext) -> Result<(), StageSystemError> {
        let stage = self
            .stages
            .get(id)
            .ok_or_else(|| StageSystemError::StageNotFound { stage_id: id.to_string() })?;

        log::info!("Executing stage: {} ({})", stage.name(), id);

        match stage.execute(context).await {
            Ok(()) => {
                log::debug!("Stage completed successfully: {}", id);
                Ok(())
            }
            Err(source_err) => {
                log::error!("Stage failed: {} - {}", id, source_err);
                Err(StageSystemError::StageExecutionFailed {
                    stage_id: id.to_string(),
                    source: Box::new(source_err),
                })
            }
        }
    }
}

impl Default for StageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
