//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per record type.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must call the record's `validate()` before persistence.
//! - Repository APIs return semantic errors (`*NotFound`, `AlreadyLinked`)
//!   in addition to DB transport errors.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod association_repo;
pub mod error;
pub mod experiment_repo;
pub mod lab_repo;
pub mod scientist_repo;

pub use error::{RepoError, RepoResult};

use crate::model::ValidationError;
use rusqlite::{Connection, Row};
use uuid::Uuid;

pub(crate) fn parse_uuid_column(row: &Row<'_>, column: &'static str) -> RepoResult<Uuid> {
    let value: String = row.get(column)?;
    Uuid::parse_str(&value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn row_exists(conn: &Connection, table: &'static str, id: Uuid) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Maps a read-side validation failure to `InvalidData`.
pub(crate) fn reject_invalid(
    table: &'static str,
    checked: Result<(), ValidationError>,
) -> RepoResult<()> {
    checked.map_err(|err| RepoError::InvalidData(format!("{table} row: {err}")))
}
