//! Experiment record.
//!
//! Experiments exist independently of scientists: removing every link to an
//! experiment leaves the record itself in place.

use super::{ensure_id, ensure_present, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable experiment identifier.
pub type ExperimentId = Uuid;

/// Research project, shareable across scientists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: ExperimentId,
    pub name: String,
    pub objective: String,
    /// Planned duration in months.
    pub num_months: u32,
}

impl Experiment {
    /// Creates an experiment with a generated id.
    pub fn new(name: impl Into<String>, objective: impl Into<String>, num_months: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            objective: objective.into(),
            num_months,
        }
    }

    /// Checks write-time invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_id(self.id)?;
        ensure_present(&self.name, "name")
    }
}
