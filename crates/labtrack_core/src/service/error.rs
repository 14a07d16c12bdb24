//! Service-level error taxonomy.

use crate::model::experiment::ExperimentId;
use crate::model::lab::LabId;
use crate::model::scientist::ScientistId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from lab tracker use-case services.
#[derive(Debug)]
pub enum ServiceError {
    /// Target scientist does not exist.
    ScientistNotFound(ScientistId),
    /// Target experiment does not exist.
    ExperimentNotFound(ExperimentId),
    /// Referenced lab does not exist.
    LabNotFound(LabId),
    /// The scientist is not linked to the experiment.
    AssociationNotFound {
        scientist_id: ScientistId,
        experiment_id: ExperimentId,
    },
    /// The scientist is already linked to the experiment.
    AlreadyLinked {
        scientist_id: ScientistId,
        experiment_id: ExperimentId,
    },
    /// Repository-level failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Returns whether callers should surface this as a not-found response.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ScientistNotFound(_)
            | Self::ExperimentNotFound(_)
            | Self::LabNotFound(_)
            | Self::AssociationNotFound { .. } => true,
            Self::AlreadyLinked { .. } => false,
            Self::Repo(err) => err.is_not_found(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScientistNotFound(id) => write!(f, "scientist not found: {id}"),
            Self::ExperimentNotFound(id) => write!(f, "experiment not found: {id}"),
            Self::LabNotFound(id) => write!(f, "lab not found: {id}"),
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
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ScientistNotFound(id) => Self::ScientistNotFound(id),
            RepoError::ExperimentNotFound(id) => Self::ExperimentNotFound(id),
            RepoError::LabNotFound(id) => Self::LabNotFound(id),
            RepoError::AssociationNotFound {
                scientist_id,
                experiment_id,
            } => Self::AssociationNotFound {
                scientist_id,
                experiment_id,
            },
            RepoError::AlreadyLinked {
                scientist_id,
                experiment_id,
            } => Self::AlreadyLinked {
                scientist_id,
                experiment_id,
            },
            other => Self::Repo(other),
        }
    }
}
