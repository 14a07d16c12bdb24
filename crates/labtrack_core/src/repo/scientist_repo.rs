//! Scientist repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Create rejects a scientist whose lab does not exist (`LabNotFound`).
//! - Deleting a scientist removes its link rows but never its experiments.

use super::{parse_uuid_column, reject_invalid, row_exists, RepoError, RepoResult};
use crate::model::lab::LabId;
use crate::model::scientist::{Scientist, ScientistId};
use rusqlite::{params, Connection, Row};

pub(crate) const SCIENTIST_COLUMNS: &str = "s.id AS id,
    s.lab_id AS lab_id,
    s.name AS name,
    s.specialty AS specialty,
    s.university AS university";

/// Repository interface for scientist records.
pub trait ScientistRepository {
    fn create_scientist(&self, scientist: &Scientist) -> RepoResult<ScientistId>;
    fn get_scientist(&self, id: ScientistId) -> RepoResult<Option<Scientist>>;
    fn list_scientists_in_lab(&self, lab_id: LabId) -> RepoResult<Vec<Scientist>>;
    fn delete_scientist(&self, id: ScientistId) -> RepoResult<()>;
}

/// SQLite-backed scientist repository.
pub struct SqliteScientistRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteScientistRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ScientistRepository for SqliteScientistRepository<'_> {
    fn create_scientist(&self, scientist: &Scientist) -> RepoResult<ScientistId> {
        scientist.validate()?;
        if !row_exists(self.conn, "labs", scientist.lab_id)? {
            return Err(RepoError::LabNotFound(scientist.lab_id));
        }

        self.conn.execute(
            "INSERT INTO scientists (id, lab_id, name, specialty, university)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                scientist.id.to_string(),
                scientist.lab_id.to_string(),
                scientist.name.as_str(),
                scientist.specialty.as_str(),
                scientist.university.as_str(),
            ],
        )?;

        Ok(scientist.id)
    }

    fn get_scientist(&self, id: ScientistId) -> RepoResult<Option<Scientist>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SCIENTIST_COLUMNS}
             FROM scientists s
             WHERE s.id = ?1;"
        ))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_scientist_row(row)?));
        }

        Ok(None)
    }

    fn list_scientists_in_lab(&self, lab_id: LabId) -> RepoResult<Vec<Scientist>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SCIENTIST_COLUMNS}
             FROM scientists s
             WHERE s.lab_id = ?1
             ORDER BY s.rowid ASC;"
        ))?;
        let mut rows = stmt.query([lab_id.to_string()])?;
        let mut scientists = Vec::new();

        while let Some(row) = rows.next()? {
            scientists.push(parse_scientist_row(row)?);
        }

        Ok(scientists)
    }

    fn delete_scientist(&self, id: ScientistId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM scientists WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::ScientistNotFound(id));
        }

        Ok(())
    }
}

pub(crate) fn parse_scientist_row(row: &Row<'_>) -> RepoResult<Scientist> {
    let scientist = Scientist {
        id: parse_uuid_column(row, "id")?,
        lab_id: parse_uuid_column(row, "lab_id")?,
        name: row.get("name")?,
        specialty: row.get("specialty")?,
        university: row.get("university")?,
    };
    reject_invalid("scientists", scientist.validate())?;
    Ok(scientist)
}
