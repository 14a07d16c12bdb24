//! Repository error taxonomy.

use crate::db::DbError;
use crate::model::experiment::ExperimentId;
use crate::model::lab::LabId;
use crate::model::scientist::ScientistId;
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from repository persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Record failed write-time validation.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    LabNotFound(LabId),
    ScientistNotFound(ScientistId),
    ExperimentNotFound(ExperimentId),
    /// No link row exists for this exact pair.
    AssociationNotFound {
        scientist_id: ScientistId,
        experiment_id: ExperimentId,
    },
    /// The pair is already linked.
    AlreadyLinked {
        scientist_id: ScientistId,
        experiment_id: ExperimentId,
    },
    /// Lab still owns scientists and cannot be removed.
    LabInUse(LabId),
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl RepoError {
    /// Returns whether this error means "the addressed record does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::LabNotFound(_)
                | Self::ScientistNotFound(_)
                | Self::ExperimentNotFound(_)
                | Self::AssociationNotFound { .. }
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::LabNotFound(id) => write!(f, "lab not found: {id}"),
            Self::ScientistNotFound(id) => write!(f, "scientist not found: {id}"),
            Self::ExperimentNotFound(id) => write!(f, "experiment not found: {id}"),
            Self::AssociationNotFound {
                scientist_id,
                experiment_id,
            } => write!(
                f,
                "scientist {scientist_id} is not linked to experiment {experiment_id}"
            ),
            Self::AlreadyLinked {
                scientist_id,
                experiment_id,
            } => write!(
                f,
                "scientist {scientist_id} is already linked to experiment {experiment_id}"
            ),
            Self::LabInUse(id) => write!(f, "lab {id} still has scientists"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
