//! Scientist detail composition.
//!
//! Gathers everything the scientist show page displays: the scientist's own
//! fields, its lab, and its linked experiments.

use crate::model::experiment::Experiment;
use crate::model::lab::Lab;
use crate::model::scientist::{Scientist, ScientistId};
use crate::repo::association_repo::AssociationRepository;
use crate::repo::lab_repo::LabRepository;
use crate::repo::scientist_repo::ScientistRepository;
use crate::repo::RepoError;
use crate::service::association_service::AssociationService;
use crate::service::error::{ServiceError, ServiceResult};
use serde::Serialize;

/// Read model for one scientist's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScientistDetail {
    pub scientist: Scientist,
    pub lab: Lab,
    /// Linked experiments in link-creation order.
    pub experiments: Vec<Experiment>,
}

/// Loads [`ScientistDetail`] read models.
pub struct DetailService<S, L, A>
where
    S: ScientistRepository,
    L: LabRepository,
    A: AssociationRepository,
{
    scientists: S,
    labs: L,
    associations: AssociationService<A>,
}

impl<S, L, A> DetailService<S, L, A>
where
    S: ScientistRepository,
    L: LabRepository,
    A: AssociationRepository,
{
    pub fn new(scientists: S, labs: L, associations: AssociationService<A>) -> Self {
        Self {
            scientists,
            labs,
            associations,
        }
    }

    /// Association service used for link listing and removal.
    pub fn associations(&self) -> &AssociationService<A> {
        &self.associations
    }

    /// Loads one scientist with its lab and linked experiments.
    ///
    /// # Errors
    /// - `ScientistNotFound` when no scientist has `scientist_id`.
    /// - `Repo(InvalidData)` when the scientist's lab row is missing.
    pub fn load(&self, scientist_id: ScientistId) -> ServiceResult<ScientistDetail> {
        let scientist = self
            .scientists
            .get_scientist(scientist_id)?
            .ok_or(ServiceError::ScientistNotFound(scientist_id))?;

        let lab = self.labs.get_lab(scientist.lab_id)?.ok_or_else(|| {
            ServiceError::Repo(RepoError::InvalidData(format!(
                "scientist {} references missing lab {}",
                scientist.id, scientist.lab_id
            )))
        })?;

        let experiments = self.associations.linked_experiments(scientist.id)?;

        Ok(ScientistDetail {
            scientist,
            lab,
            experiments,
        })
    }
}
