//! Demo dataset for local servers and smoke checks.
//!
//! # Invariants
//! - Seeding runs inside one transaction; a failure leaves no partial data.
//! - Each call inserts fresh records with new ids.

use crate::model::experiment::Experiment;
use crate::model::lab::Lab;
use crate::model::scientist::Scientist;
use crate::model::scientist_experiment::ScientistExperiment;
use crate::repo::association_repo::{AssociationRepository, SqliteAssociationRepository};
use crate::repo::experiment_repo::{ExperimentRepository, SqliteExperimentRepository};
use crate::repo::lab_repo::{LabRepository, SqliteLabRepository};
use crate::repo::scientist_repo::{ScientistRepository, SqliteScientistRepository};
use crate::repo::RepoResult;
use log::info;
use rusqlite::Connection;
use std::time::Instant;

/// Records created by [`seed_demo_data`].
#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub labs: Vec<Lab>,
    pub scientists: Vec<Scientist>,
    pub experiments: Vec<Experiment>,
    pub links: Vec<ScientistExperiment>,
}

/// Inserts two labs, three scientists, five experiments and their links.
pub fn seed_demo_data(conn: &mut Connection) -> RepoResult<SeedSummary> {
    let started_at = Instant::now();
    let tx = conn.transaction()?;

    let nuclear = Lab::new("Nuclear Lab");
    let electric = Lab::new("Electric Lab");

    let curie = Scientist::new(
        nuclear.id,
        "Marie Curie",
        "radioactivity",
        "University of Paris",
    );
    let franky = Scientist::new(
        nuclear.id,
        "Victor Frankenstein",
        "electrical-biology",
        "University of Ingolstadt",
    );
    let jekyll = Scientist::new(
        electric.id,
        "Dr. Jekyll or Mr. Hyde",
        "sleep deprivation",
        "University of London",
    );

    let radio_waves = Experiment::new("Radio-waves", "understand them", 6);
    let hand_hurts = Experiment::new("My Hand Hurts", "understand why", 14);
    let monster = Experiment::new("Monster", "electic-life", 7);
    let reduced_sleep = Experiment::new("Reduced Sleep", "who am I?", 2);
    let more_reduced_sleep = Experiment::new("More Reduced Sleep", "who am I now?", 10);

    let links = vec![
        ScientistExperiment::new(curie.id, radio_waves.id),
        ScientistExperiment::new(curie.id, hand_hurts.id),
        ScientistExperiment::new(franky.id, radio_waves.id),
        ScientistExperiment::new(franky.id, monster.id),
        ScientistExperiment::new(jekyll.id, radio_waves.id),
        ScientistExperiment::new(jekyll.id, monster.id),
        ScientistExperiment::new(jekyll.id, reduced_sleep.id),
        ScientistExperiment::new(jekyll.id, more_reduced_sleep.id),
    ];

    let summary = SeedSummary {
        labs: vec![nuclear, electric],
        scientists: vec![curie, franky, jekyll],
        experiments: vec![
            radio_waves,
            hand_hurts,
            monster,
            reduced_sleep,
            more_reduced_sleep,
        ],
        links,
    };

    {
        let labs = SqliteLabRepository::new(&tx);
        let scientists = SqliteScientistRepository::new(&tx);
        let experiments = SqliteExperimentRepository::new(&tx);
        let associations = SqliteAssociationRepository::new(&tx);

        for lab in &summary.labs {
            labs.create_lab(lab)?;
        }
        for scientist in &summary.scientists {
            scientists.create_scientist(scientist)?;
        }
        for experiment in &summary.experiments {
            experiments.create_experiment(experiment)?;
        }
        for link in &summary.links {
            associations.create_association(link)?;
        }
    }
    tx.commit()?;

    info!(
        "event=seed module=seed status=ok labs={} scientists={} experiments={} links={} duration_ms={}",
        summary.labs.len(),
        summary.scientists.len(),
        summary.experiments.len(),
        summary.links.len(),
        started_at.elapsed().as_millis()
    );
    Ok(summary)
}
