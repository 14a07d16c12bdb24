//! Path and method resolution.
//!
//! # Routes
//! - `GET /scientists/{scientist_id}`
//! - `DELETE /scientists/{scientist_id}/experiments/{experiment_id}`
//!   (HTML forms send `POST` with `_method=delete`)
//!
//! Ids that are not UUIDs resolve to `NotFound`, same as unknown records.

use crate::http::{Method, Request};
use labtrack_core::{ExperimentId, ScientistId};
use uuid::Uuid;

/// Form field that carries the method override for HTML forms.
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

/// Matched application route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ScientistShow {
        scientist_id: ScientistId,
    },
    ScientistExperimentDestroy {
        scientist_id: ScientistId,
        experiment_id: ExperimentId,
    },
}

/// Outcome of resolving one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched(Route),
    /// Path is known but the method is not; `allow` lists accepted methods.
    MethodNotAllowed { allow: &'static str },
    NotFound,
}

/// Path of the scientist show page.
pub fn scientist_path(scientist_id: ScientistId) -> String {
    format!("/scientists/{scientist_id}")
}

/// Path of one scientist/experiment link.
pub fn scientist_experiment_path(
    scientist_id: ScientistId,
    experiment_id: ExperimentId,
) -> String {
    format!("/scientists/{scientist_id}/experiments/{experiment_id}")
}

/// Resolves a request to a route, honoring the `_method` form override.
pub fn resolve(request: &Request) -> Resolution {
    let method = effective_method(request);
    let path = request.path().trim_end_matches('/');
    let segments: Vec<&str> = path.split('/').skip(1).collect();

    match segments.as_slice() {
        ["scientists", scientist_id] => {
            if !matches!(method, Method::Get | Method::Head) {
                return Resolution::MethodNotAllowed { allow: "GET, HEAD" };
            }
            match parse_id(scientist_id) {
                Some(scientist_id) => Resolution::Matched(Route::ScientistShow { scientist_id }),
                None => Resolution::NotFound,
            }
        }
        ["scientists", scientist_id, "experiments", experiment_id] => {
            if method != Method::Delete {
                return Resolution::MethodNotAllowed { allow: "DELETE" };
            }
            match (parse_id(scientist_id), parse_id(experiment_id)) {
                (Some(scientist_id), Some(experiment_id)) => {
                    Resolution::Matched(Route::ScientistExperimentDestroy {
                        scientist_id,
                        experiment_id,
                    })
                }
                _ => Resolution::NotFound,
            }
        }
        _ => Resolution::NotFound,
    }
}

fn effective_method(request: &Request) -> Method {
    if request.method != Method::Post {
        return request.method;
    }
    match request.form_value(METHOD_OVERRIDE_FIELD) {
        Some(value) if value.eq_ignore_ascii_case("delete") => Method::Delete,
        _ => Method::Post,
    }
}

fn parse_id(segment: &str) -> Option<Uuid> {
    Uuid::parse_str(segment).ok().filter(|id| !id.is_nil())
}

#[cfg(test)]
mod tests {
    use super::{resolve, scientist_experiment_path, scientist_path, Resolution, Route};
    use crate::http::{Method, Request};
    use uuid::Uuid;

    #[test]
    fn resolves_show_with_and_without_trailing_slash() {
        let id = Uuid::new_v4();
        let expected = Resolution::Matched(Route::ScientistShow { scientist_id: id });

        assert_eq!(resolve(&Request::get(scientist_path(id))), expected);
        assert_eq!(resolve(&Request::get(format!("/scientists/{id}/"))), expected);
        assert_eq!(resolve(&Request::get(format!("/scientists/{id}?x=1"))), expected);
    }

    #[test]
    fn post_with_override_resolves_destroy() {
        let scientist_id = Uuid::new_v4();
        let experiment_id = Uuid::new_v4();
        let path = scientist_experiment_path(scientist_id, experiment_id);

        let expected = Resolution::Matched(Route::ScientistExperimentDestroy {
            scientist_id,
            experiment_id,
        });
        assert_eq!(resolve(&Request::post_form(path.as_str(), "_method=delete")), expected);
        assert_eq!(resolve(&Request::new(Method::Delete, path.as_str(), "")), expected);
        assert_eq!(
            resolve(&Request::post_form(path.as_str(), "")),
            Resolution::MethodNotAllowed { allow: "DELETE" }
        );
    }

    #[test]
    fn unknown_paths_and_malformed_ids_are_not_found() {
        assert_eq!(resolve(&Request::get("/")), Resolution::NotFound);
        assert_eq!(resolve(&Request::get("/labs")), Resolution::NotFound);
        assert_eq!(resolve(&Request::get("/scientists/42")), Resolution::NotFound);
        assert_eq!(
            resolve(&Request::get(format!("/scientists/{}", Uuid::nil()))),
            Resolution::NotFound
        );
    }

    #[test]
    fn show_rejects_writes() {
        let request = Request::post_form(scientist_path(Uuid::new_v4()), "");
        assert_eq!(
            resolve(&request),
            Resolution::MethodNotAllowed { allow: "GET, HEAD" }
        );
    }
}
