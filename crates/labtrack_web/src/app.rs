//! Application entry point: one request in, one response out.
//!
//! # Invariants
//! - Requests are handled sequentially against one borrowed connection.
//! - Request context (ids) travels as handler arguments, never as globals.

use crate::handlers;
use crate::http::{Request, Response};
use crate::routes::{resolve, Resolution, Route};
use labtrack_core::{
    log_field, AssociationService, DetailService, SqliteAssociationRepository,
    SqliteLabRepository, SqliteScientistRepository,
};
use log::{info, warn};
use rusqlite::Connection;
use std::time::Instant;

type SqliteDetailService<'conn> = DetailService<
    SqliteScientistRepository<'conn>,
    SqliteLabRepository<'conn>,
    SqliteAssociationRepository<'conn>,
>;

/// Lab tracker web application bound to one SQLite connection.
pub struct App<'conn> {
    details: SqliteDetailService<'conn>,
}

impl<'conn> App<'conn> {
    /// Creates the application over a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            details: DetailService::new(
                SqliteScientistRepository::new(conn),
                SqliteLabRepository::new(conn),
                AssociationService::new(SqliteAssociationRepository::new(conn)),
            ),
        }
    }

    /// Routes and handles one request.
    pub fn handle(&self, request: &Request) -> Response {
        let started_at = Instant::now();
        let path = request.path();

        let response = match resolve(request) {
            Resolution::Matched(Route::ScientistShow { scientist_id }) => {
                handlers::show_scientist(&self.details, scientist_id, path)
            }
            Resolution::Matched(Route::ScientistExperimentDestroy {
                scientist_id,
                experiment_id,
            }) => handlers::remove_experiment(
                self.details.associations(),
                scientist_id,
                experiment_id,
                path,
            ),
            Resolution::MethodNotAllowed { allow } => handlers::method_not_allowed(allow),
            Resolution::NotFound => handlers::not_found(path),
        };

        if response.status >= 500 {
            warn!(
                "event=http_request module=web status=error method={} path={} code={} duration_ms={}",
                request.method.as_str(),
                log_field(path),
                response.status,
                started_at.elapsed().as_millis()
            );
        } else {
            info!(
                "event=http_request module=web status=ok method={} path={} code={} duration_ms={}",
                request.method.as_str(),
                log_field(path),
                response.status,
                started_at.elapsed().as_millis()
            );
        }
        response
    }
}
