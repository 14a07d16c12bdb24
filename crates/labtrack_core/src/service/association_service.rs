//! Scientist/experiment association use-case service.
//!
//! # Responsibility
//! - Create and remove individual collaboration links.
//! - List a scientist's experiments (and the reverse) in link order.
//!
//! # Invariants
//! - Listing for an unknown scientist is `ScientistNotFound`, never an
//!   empty list.
//! - Removal targets one pair only; the scientist, the experiment and every
//!   other link stay untouched.

use crate::model::experiment::{Experiment, ExperimentId};
use crate::model::scientist::{Scientist, ScientistId};
use crate::model::scientist_experiment::ScientistExperiment;
use crate::repo::association_repo::AssociationRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};
use std::time::Instant;

/// Association service facade.
pub struct AssociationService<R: AssociationRepository> {
    repo: R,
}

impl<R: AssociationRepository> AssociationService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Links one scientist to one experiment.
    pub fn link(
        &self,
        scientist_id: ScientistId,
        experiment_id: ExperimentId,
    ) -> ServiceResult<ScientistExperiment> {
        let link = ScientistExperiment::new(scientist_id, experiment_id);
        self.repo.create_association(&link)?;
        Ok(link)
    }

    /// Returns every experiment linked to the scientist, oldest link first.
    pub fn linked_experiments(&self, scientist_id: ScientistId) -> ServiceResult<Vec<Experiment>> {
        if !self.repo.scientist_exists(scientist_id)? {
            return Err(ServiceError::ScientistNotFound(scientist_id));
        }
        Ok(self.repo.list_experiments_for_scientist(scientist_id)?)
    }

    /// Returns every scientist linked to the experiment, oldest link first.
    pub fn linked_scientists(&self, experiment_id: ExperimentId) -> ServiceResult<Vec<Scientist>> {
        if !self.repo.experiment_exists(experiment_id)? {
            return Err(ServiceError::ExperimentNotFound(experiment_id));
        }
        Ok(self.repo.list_scientists_for_experiment(experiment_id)?)
    }

    /// Removes the link for one exact (scientist, experiment) pair.
    ///
    /// # Errors
    /// - `AssociationNotFound` when the pair is not linked, including a
    ///   repeated removal of the same pair.
    pub fn remove_association(
        &self,
        scientist_id: ScientistId,
        experiment_id: ExperimentId,
    ) -> ServiceResult<()> {
        let started_at = Instant::now();
        match self.repo.delete_association(scientist_id, experiment_id) {
            Ok(()) => {
                info!(
                    "event=association_remove module=service status=ok scientist_id={} experiment_id={} duration_ms={}",
                    scientist_id,
                    experiment_id,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=association_remove module=service status=error scientist_id={} experiment_id={} duration_ms={} error={}",
                    scientist_id,
                    experiment_id,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}
