//! Tests for record decoding.

use serde_json::json;
use trial_model::{FieldSelector, FieldValue, TrialModelError, TrialRecord, load_records_json};

#[test]
fn records_tolerate_every_value_shape() {
    let json = json!([
        {
            "id": 17,
            "overview": {
                "trial_phase": "phase_1_2",
                "status": null,
                "sponsor_collaborators": ["Novartis", "Roche"],
                "enrollment": 120,
                "healthy": false
            },
            "criteria": [{"sex": "ALL"}],
            "results": null
        },
        {"overview": null}
    ])
    .to_string();

    let records = load_records_json(&json).unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.display_id().as_deref(), Some("17"));
    assert_eq!(
        first.resolve(&FieldSelector::TrialPhase.field_path()),
        Some(&FieldValue::from("phase_1_2"))
    );
    assert_eq!(
        first.resolve(&FieldSelector::Status.field_path()),
        Some(&FieldValue::Null)
    );
    assert!(first.resolve(&FieldSelector::SponsorCollaborators.field_path()).unwrap().is_list());
    assert_eq!(
        first.resolve_field("enrollment").and_then(FieldValue::as_text).as_deref(),
        Some("120")
    );
    assert_eq!(
        first.resolve(&FieldSelector::Sex.field_path()),
        Some(&FieldValue::from("ALL"))
    );
    assert!(first.results.is_empty());
    assert_eq!(records[1], TrialRecord::default());
}

#[test]
fn wrapped_collection_is_accepted() {
    let records = load_records_json(r#"{"trials": [{"id": "NCT01"}]}"#).unwrap();
    assert_eq!(records[0].display_id().as_deref(), Some("NCT01"));
}

#[test]
fn malformed_json_is_an_error() {
    let error = load_records_json("{not json").unwrap_err();
    assert!(matches!(error, TrialModelError::Json(_)));
    assert!(error.to_string().starts_with("invalid trial JSON"));
}
