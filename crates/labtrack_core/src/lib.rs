//! Core domain logic for the lab tracker.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{
    active_log_dir, default_log_level, init_logging, log_field, Console, LoggingError,
};
pub use model::experiment::{Experiment, ExperimentId};
pub use model::lab::{Lab, LabId};
pub use model::scientist::{Scientist, ScientistId};
pub use model::scientist_experiment::{AssociationId, ScientistExperiment};
pub use model::ValidationError;
pub use repo::association_repo::{AssociationRepository, SqliteAssociationRepository};
pub use repo::experiment_repo::{ExperimentRepository, SqliteExperimentRepository};
pub use repo::lab_repo::{LabRepository, SqliteLabRepository};
pub use repo::scientist_repo::{ScientistRepository, SqliteScientistRepository};
pub use repo::{RepoError, RepoResult};
pub use seed::{seed_demo_data, SeedSummary};
pub use service::association_service::AssociationService;
pub use service::detail_service::{DetailService, ScientistDetail};
pub use service::error::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
