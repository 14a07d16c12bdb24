//! Request handlers for the scientist show page and link removal.
//!
//! Handlers never panic: every service outcome maps to a response.

use crate::http::Response;
use crate::routes::scientist_path;
use crate::views;
use labtrack_core::{
    log_field, AssociationRepository, AssociationService, DetailService, ExperimentId,
    LabRepository, ScientistId, ScientistRepository, ServiceError,
};
use log::error;

/// Renders the scientist show page.
pub fn show_scientist<S, L, A>(
    details: &DetailService<S, L, A>,
    scientist_id: ScientistId,
    path: &str,
) -> Response
where
    S: ScientistRepository,
    L: LabRepository,
    A: AssociationRepository,
{
    match details.load(scientist_id) {
        Ok(detail) => Response::html(200, views::scientist_show::render(&detail)),
        Err(err) => error_response(&err, path),
    }
}

/// Removes one scientist/experiment link and redirects back to the scientist.
///
/// An unknown pair is a 404, not a redirect.
pub fn remove_experiment<A: AssociationRepository>(
    associations: &AssociationService<A>,
    scientist_id: ScientistId,
    experiment_id: ExperimentId,
    path: &str,
) -> Response {
    match associations.remove_association(scientist_id, experiment_id) {
        Ok(()) => Response::see_other(scientist_path(scientist_id)),
        Err(err) => error_response(&err, path),
    }
}

pub fn not_found(path: &str) -> Response {
    Response::html(404, views::not_found_page(path))
}

pub fn method_not_allowed(allow: &'static str) -> Response {
    Response::html(405, views::method_not_allowed_page()).with_header("Allow", allow)
}

fn error_response(err: &ServiceError, path: &str) -> Response {
    if err.is_not_found() {
        return not_found(path);
    }

    error!(
        "event=http_handler module=web status=error path={} error={}",
        log_field(path),
        err
    );
    Response::html(500, views::server_error_page())
}
