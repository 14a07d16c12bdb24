use labtrack_core::{Experiment, Lab, Scientist, ScientistExperiment, ValidationError};
use uuid::Uuid;

#[test]
fn constructors_generate_distinct_non_nil_ids() {
    let first = Lab::new("Nuclear Lab");
    let second = Lab::new("Nuclear Lab");

    assert!(!first.id.is_nil());
    assert_ne!(first.id, second.id);
}

#[test]
fn lab_with_id_rejects_nil_uuid() {
    let err = Lab::with_id(Uuid::nil(), "Nuclear Lab").unwrap_err();
    assert_eq!(err, ValidationError::NilId);
}

#[test]
fn scientist_validation_requires_name_and_lab() {
    let lab = Lab::new("Nuclear Lab");

    let valid = Scientist::new(lab.id, "Marie Curie", "", "");
    assert!(valid.validate().is_ok());

    let blank = Scientist::new(lab.id, " \t", "radioactivity", "Paris");
    assert_eq!(
        blank.validate().unwrap_err(),
        ValidationError::BlankField("name")
    );

    let orphan = Scientist::new(Uuid::nil(), "Marie Curie", "", "");
    assert_eq!(
        orphan.validate().unwrap_err(),
        ValidationError::MissingReference("lab_id")
    );
}

#[test]
fn link_validation_requires_both_ends() {
    let link = ScientistExperiment::new(Uuid::new_v4(), Uuid::nil());
    assert_eq!(
        link.validate().unwrap_err(),
        ValidationError::MissingReference("experiment_id")
    );
}

#[test]
fn experiment_serialization_uses_expected_fields() {
    let experiment = Experiment::new("Radio-waves", "understand them", 6);

    let json = serde_json::to_value(&experiment).unwrap();
    assert_eq!(json["id"], experiment.id.to_string());
    assert_eq!(json["name"], "Radio-waves");
    assert_eq!(json["objective"], "understand them");
    assert_eq!(json["num_months"], 6);
}
