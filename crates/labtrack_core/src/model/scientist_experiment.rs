//! Scientist/experiment join record.
//!
//! # Invariants
//! - One record per (scientist, experiment) pair.
//! - Deleting a record removes exactly one collaboration link.

use super::experiment::ExperimentId;
use super::scientist::ScientistId;
use super::{ensure_id, ensure_reference, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable association identifier.
pub type AssociationId = Uuid;

/// One collaboration link between a scientist and an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScientistExperiment {
    pub id: AssociationId,
    pub scientist_id: ScientistId,
    pub experiment_id: ExperimentId,
}

impl ScientistExperiment {
    /// Creates a link record with a generated id.
    pub fn new(scientist_id: ScientistId, experiment_id: ExperimentId) -> Self {
        Self {
            id: Uuid::new_v4(),
            scientist_id,
            experiment_id,
        }
    }

    /// Checks write-time invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_id(self.id)?;
        ensure_reference(self.scientist_id, "scientist_id")?;
        ensure_reference(self.experiment_id, "experiment_id")
    }
}
