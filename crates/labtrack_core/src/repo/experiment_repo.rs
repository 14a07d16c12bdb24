//! Experiment repository contracts and SQLite implementation.

use super::{parse_uuid_column, reject_invalid, RepoError, RepoResult};
use crate::model::experiment::{Experiment, ExperimentId};
use rusqlite::{params, Connection, Row};

pub(crate) const EXPERIMENT_COLUMNS: &str = "e.id AS id,
    e.name AS name,
    e.objective AS objective,
    e.num_months AS num_months";

/// Repository interface for experiment records.
pub trait ExperimentRepository {
    fn create_experiment(&self, experiment: &Experiment) -> RepoResult<ExperimentId>;
    fn get_experiment(&self, id: ExperimentId) -> RepoResult<Option<Experiment>>;
    fn list_experiments(&self) -> RepoResult<Vec<Experiment>>;
    fn delete_experiment(&self, id: ExperimentId) -> RepoResult<()>;
}

/// SQLite-backed experiment repository.
pub struct SqliteExperimentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExperimentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ExperimentRepository for SqliteExperimentRepository<'_> {
    fn create_experiment(&self, experiment: &Experiment) -> RepoResult<ExperimentId> {
        experiment.validate()?;

        self.conn.execute(
            "INSERT INTO experiments (id, name, objective, num_months)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                experiment.id.to_string(),
                experiment.name.as_str(),
                experiment.objective.as_str(),
                i64::from(experiment.num_months),
            ],
        )?;

        Ok(experiment.id)
    }

    fn get_experiment(&self, id: ExperimentId) -> RepoResult<Option<Experiment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPERIMENT_COLUMNS}
             FROM experiments e
             WHERE e.id = ?1;"
        ))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_experiment_row(row)?));
        }

        Ok(None)
    }

    fn list_experiments(&self) -> RepoResult<Vec<Experiment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPERIMENT_COLUMNS}
             FROM experiments e
             ORDER BY e.rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut experiments = Vec::new();

        while let Some(row) = rows.next()? {
            experiments.push(parse_experiment_row(row)?);
        }

        Ok(experiments)
    }

    fn delete_experiment(&self, id: ExperimentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM experiments WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::ExperimentNotFound(id));
        }

        Ok(())
    }
}

pub(crate) fn parse_experiment_row(row: &Row<'_>) -> RepoResult<Experiment> {
    let raw_months: i64 = row.get("num_months")?;
    let num_months = u32::try_from(raw_months).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid num_months value `{raw_months}` in experiments.num_months"
        ))
    })?;

    let experiment = Experiment {
        id: parse_uuid_column(row, "id")?,
        name: row.get("name")?,
        objective: row.get("objective")?,
        num_months,
    };
    reject_invalid("experiments", experiment.validate())?;
    Ok(experiment)
}
