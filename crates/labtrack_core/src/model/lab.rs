//! Lab record.

use super::{ensure_id, ensure_present, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable lab identifier.
pub type LabId = Uuid;

/// Organizational unit that employs scientists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lab {
    pub id: LabId,
    pub name: String,
}

impl Lab {
    /// Creates a lab with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Creates a lab with a caller-provided id.
    ///
    /// # Errors
    /// - Returns `ValidationError::NilId` when `id` is nil.
    pub fn with_id(id: LabId, name: impl Into<String>) -> Result<Self, ValidationError> {
        ensure_id(id)?;
        Ok(Self {
            id,
            name: name.into(),
        })
    }

    /// Checks write-time invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_id(self.id)?;
        ensure_present(&self.name, "name")
    }
}
