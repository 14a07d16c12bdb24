//! Domain model for labs, scientists, experiments and their links.
//!
//! # Responsibility
//! - Define canonical records used by repositories and services.
//! - Provide creation helpers and write-time validation.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil UUID.
//! - A scientist always references exactly one lab.
//! - Scientist/experiment collaboration is an explicit join record with its
//!   own identity, never an embedded list.

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod experiment;
pub mod lab;
pub mod scientist;
pub mod scientist_experiment;

/// Write-time validation failures shared by every record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Record id is the nil UUID.
    NilId,
    /// Required text field is empty after trimming.
    BlankField(&'static str),
    /// Required reference points at the nil UUID.
    MissingReference(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "record id must not be nil"),
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::MissingReference(field) => write!(f, "`{field}` reference is required"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn ensure_id(id: Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::NilId);
    }
    Ok(())
}

pub(crate) fn ensure_reference(id: Uuid, field: &'static str) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::MissingReference(field));
    }
    Ok(())
}

pub(crate) fn ensure_present(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}
