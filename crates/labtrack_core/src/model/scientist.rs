//! Scientist record.
//!
//! # Invariants
//! - `lab_id` is required; the referenced lab must exist at write time
//!   (enforced by the repository, not by this type).

use super::lab::LabId;
use super::{ensure_id, ensure_present, ensure_reference, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable scientist identifier.
pub type ScientistId = Uuid;

/// Researcher belonging to one lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scientist {
    pub id: ScientistId,
    pub lab_id: LabId,
    pub name: String,
    pub specialty: String,
    pub university: String,
}

impl Scientist {
    /// Creates a scientist with a generated id.
    pub fn new(
        lab_id: LabId,
        name: impl Into<String>,
        specialty: impl Into<String>,
        university: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            lab_id,
            name: name.into(),
            specialty: specialty.into(),
            university: university.into(),
        }
    }

    /// Checks write-time invariants.
    ///
    /// `specialty` and `university` may be empty; only `name` is required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_id(self.id)?;
        ensure_reference(self.lab_id, "lab_id")?;
        ensure_present(&self.name, "name")
    }
}
