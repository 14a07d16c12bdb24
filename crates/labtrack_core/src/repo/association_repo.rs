//! Scientist/experiment association repository and SQLite implementation.
//!
//! # Responsibility
//! - Persist and remove individual collaboration links.
//! - List linked records in link-creation order.
//!
//! # Invariants
//! - Deletes are keyed by the exact (scientist, experiment) pair and touch
//!   one row at most; linked records themselves are never deleted here.
//! - Listings follow `scientist_experiments.seq ASC`.

use super::experiment_repo::{parse_experiment_row, EXPERIMENT_COLUMNS};
use super::scientist_repo::{parse_scientist_row, SCIENTIST_COLUMNS};
use super::{parse_uuid_column, reject_invalid, row_exists, RepoError, RepoResult};
use crate::model::experiment::{Experiment, ExperimentId};
use crate::model::scientist::{Scientist, ScientistId};
use crate::model::scientist_experiment::{AssociationId, ScientistExperiment};
use rusqlite::{params, Connection, Row};

/// Repository interface for scientist/experiment links.
pub trait AssociationRepository {
    /// Inserts one link after checking both ends exist and the pair is new.
    fn create_association(&self, link: &ScientistExperiment) -> RepoResult<AssociationId>;
    /// Loads the link for one exact pair.
    fn find_association(
        &self,
        scientist_id: ScientistId,
        experiment_id: ExperimentId,
    ) -> RepoResult<Option<ScientistExperiment>>;
    /// Deletes the link for one exact pair.
    fn delete_association(
        &self,
        scientist_id: ScientistId,
        experiment_id: ExperimentId,
    ) -> RepoResult<()>;
    /// Lists experiments linked to one scientist.
    fn list_experiments_for_scientist(
        &self,
        scientist_id: ScientistId,
    ) -> RepoResult<Vec<Experiment>>;
    /// Lists scientists linked to one experiment.
    fn list_scientists_for_experiment(
        &self,
        experiment_id: ExperimentId,
    ) -> RepoResult<Vec<Scientist>>;
    fn scientist_exists(&self, scientist_id: ScientistId) -> RepoResult<bool>;
    fn experiment_exists(&self, experiment_id: ExperimentId) -> RepoResult<bool>;
}

/// SQLite-backed association repository.
pub struct SqliteAssociationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAssociationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AssociationRepository for SqliteAssociationRepository<'_> {
    fn create_association(&self, link: &ScientistExperiment) -> RepoResult<AssociationId> {
        link.validate()?;
        if !self.scientist_exists(link.scientist_id)? {
            return Err(RepoError::ScientistNotFound(link.scientist_id));
        }
        if !self.experiment_exists(link.experiment_id)? {
            return Err(RepoError::ExperimentNotFound(link.experiment_id));
        }
        if self
            .find_association(link.scientist_id, link.experiment_id)?
            .is_some()
        {
            return Err(RepoError::AlreadyLinked {
                scientist_id: link.scientist_id,
                experiment_id: link.experiment_id,
            });
        }

        self.conn.execute(
            "INSERT INTO scientist_experiments (id, scientist_id, experiment_id)
             VALUES (?1, ?2, ?3);",
            params![
                link.id.to_string(),
                link.scientist_id.to_string(),
                link.experiment_id.to_string(),
            ],
        )?;

        Ok(link.id)
    }

    fn find_association(
        &self,
        scientist_id: ScientistId,
        experiment_id: ExperimentId,
    ) -> RepoResult<Option<ScientistExperiment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, scientist_id, experiment_id
             FROM scientist_experiments
             WHERE scientist_id = ?1
               AND experiment_id = ?2;",
        )?;

        let mut rows = stmt.query(params![
            scientist_id.to_string(),
            experiment_id.to_string()
        ])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_association_row(row)?));
        }

        Ok(None)
    }

    fn delete_association(
        &self,
        scientist_id: ScientistId,
        experiment_id: ExperimentId,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM scientist_experiments
             WHERE scientist_id = ?1
               AND experiment_id = ?2;",
            params![scientist_id.to_string(), experiment_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::AssociationNotFound {
                scientist_id,
                experiment_id,
            });
        }

        Ok(())
    }

    fn list_experiments_for_scientist(
        &self,
        scientist_id: ScientistId,
    ) -> RepoResult<Vec<Experiment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPERIMENT_COLUMNS}
             FROM scientist_experiments se
             JOIN experiments e ON e.id = se.experiment_id
             WHERE se.scientist_id = ?1
             ORDER BY se.seq ASC;"
        ))?;
        let mut rows = stmt.query([scientist_id.to_string()])?;
        let mut experiments = Vec::new();

        while let Some(row) = rows.next()? {
            experiments.push(parse_experiment_row(row)?);
        }

        Ok(experiments)
    }

    fn list_scientists_for_experiment(
        &self,
        experiment_id: ExperimentId,
    ) -> RepoResult<Vec<Scientist>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SCIENTIST_COLUMNS}
             FROM scientist_experiments se
             JOIN scientists s ON s.id = se.scientist_id
             WHERE se.experiment_id = ?1
             ORDER BY se.seq ASC;"
        ))?;
        let mut rows = stmt.query([experiment_id.to_string()])?;
        let mut scientists = Vec::new();

        while let Some(row) = rows.next()? {
            scientists.push(parse_scientist_row(row)?);
        }

        Ok(scientists)
    }

    fn scientist_exists(&self, scientist_id: ScientistId) -> RepoResult<bool> {
        row_exists(self.conn, "scientists", scientist_id)
    }

    fn experiment_exists(&self, experiment_id: ExperimentId) -> RepoResult<bool> {
        row_exists(self.conn, "experiments", experiment_id)
    }
}

fn parse_association_row(row: &Row<'_>) -> RepoResult<ScientistExperiment> {
    let link = ScientistExperiment {
        id: parse_uuid_column(row, "id")?,
        scientist_id: parse_uuid_column(row, "scientist_id")?,
        experiment_id: parse_uuid_column(row, "experiment_id")?,
    };
    reject_invalid("scientist_experiments", link.validate())?;
    Ok(link)
}
