//! Lab repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Listing order is creation order (`rowid ASC`).
//! - A lab that still owns scientists cannot be deleted.

use super::{parse_uuid_column, reject_invalid, row_exists, RepoError, RepoResult};
use crate::model::lab::{Lab, LabId};
use rusqlite::{params, Connection, Row};

const LAB_SELECT_SQL: &str = "SELECT id, name FROM labs";

/// Repository interface for lab records.
pub trait LabRepository {
    fn create_lab(&self, lab: &Lab) -> RepoResult<LabId>;
    fn get_lab(&self, id: LabId) -> RepoResult<Option<Lab>>;
    fn list_labs(&self) -> RepoResult<Vec<Lab>>;
    fn delete_lab(&self, id: LabId) -> RepoResult<()>;
}

/// SQLite-backed lab repository.
pub struct SqliteLabRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLabRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl LabRepository for SqliteLabRepository<'_> {
    fn create_lab(&self, lab: &Lab) -> RepoResult<LabId> {
        lab.validate()?;

        self.conn.execute(
            "INSERT INTO labs (id, name) VALUES (?1, ?2);",
            params![lab.id.to_string(), lab.name.as_str()],
        )?;

        Ok(lab.id)
    }

    fn get_lab(&self, id: LabId) -> RepoResult<Option<Lab>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LAB_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_lab_row(row)?));
        }

        Ok(None)
    }

    fn list_labs(&self) -> RepoResult<Vec<Lab>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LAB_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut labs = Vec::new();

        while let Some(row) = rows.next()? {
            labs.push(parse_lab_row(row)?);
        }

        Ok(labs)
    }

    fn delete_lab(&self, id: LabId) -> RepoResult<()> {
        if !row_exists(self.conn, "labs", id)? {
            return Err(RepoError::LabNotFound(id));
        }

        let staffed: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM scientists WHERE lab_id = ?1);",
            [id.to_string()],
            |row| row.get(0),
        )?;
        if staffed == 1 {
            return Err(RepoError::LabInUse(id));
        }

        self.conn
            .execute("DELETE FROM labs WHERE id = ?1;", [id.to_string()])?;
        Ok(())
    }
}

fn parse_lab_row(row: &Row<'_>) -> RepoResult<Lab> {
    let lab = Lab {
        id: parse_uuid_column(row, "id")?,
        name: row.get("name")?,
    };
    reject_invalid("labs", lab.validate())?;
    Ok(lab)
}
