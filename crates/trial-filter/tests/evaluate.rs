//! Filter state and criteria loaded from saved JSON.

use serde_json::json;
use trial_filter::{evaluate_criteria, filter_records, search_records};
use trial_model::{TherapeuticFilterState, TrialRecord, criteria_from_json, load_records_json};

fn fixture() -> Vec<TrialRecord> {
    let value = json!([
        {
            "id": "NCT-001",
            "overview": {
                "therapeutic_area": "breast_cancer",
                "trial_phase": "phase_1_2",
                "status": "Active",
                "line_of_therapy": "at_least_second_line",
                "sponsor_collaborators": "Pfizer\nMerck",
                "biomarker": ["HER2+", "HR-"]
            },
            "criteria": [{"sex": "FEMALE"}]
        },
        {
            "id": "NCT-002",
            "overview": {
                "therapeutic_area": "lung_cancer",
                "trial_phase": "Phase III",
                "status": "Closed",
                "line_of_therapy": "first_line",
                "sponsor_collaborators": "Roche, Genentech"
            },
            "criteria": [{"sex": "ALL"}]
        },
        {
            "id": "NCT-003",
            "overview": {"therapeutic_area": "Breast Cancer", "status": null}
        }
    ]);
    load_records_json(&value.to_string()).unwrap()
}

fn ids(records: Vec<&TrialRecord>) -> Vec<String> {
    records
        .into_iter()
        .filter_map(TrialRecord::display_id)
        .collect()
}

#[test]
fn empty_state_keeps_every_record() {
    let records = fixture();
    let state = TherapeuticFilterState::from_json("{}").unwrap();
    assert_eq!(filter_records(&records, &state).len(), records.len());
}

#[test]
fn saved_filter_state_applies_synonyms() {
    let records = fixture();
    let state = TherapeuticFilterState::from_json(
        r#"{
            "therapeuticAreas": ["Breast Cancer"],
            "trialPhases": ["Phase I/II", "Phase III"],
            "lineOfTherapy": ["2+ - At least second line"]
        }"#,
    )
    .unwrap();
    assert_eq!(ids(filter_records(&records, &state)), vec!["NCT-001"]);
}

#[test]
fn sponsor_and_biomarker_dimensions_are_list_valued() {
    let records = fixture();
    let state = TherapeuticFilterState::from_json(
        r#"{"sponsors": ["Genentech", "Merck"], "biomarkers": ["her2+"]}"#,
    )
    .unwrap();
    assert_eq!(ids(filter_records(&records, &state)), vec!["NCT-001"]);
}

#[test]
fn criteria_fold_left_to_right() {
    let record = load_records_json(
        &json!([{"overview": {"status": "Closed", "phase": "Phase I"}}]).to_string(),
    )
    .unwrap()
    .remove(0);
    let criteria = criteria_from_json(
        r#"[
            {"id": "1", "field": "status", "operator": "equals", "value": "Active", "logic": "AND"},
            {"id": "2", "field": "phase", "operator": "equals", "value": "Phase I", "logic": "OR"}
        ]"#,
    )
    .unwrap();
    assert!(evaluate_criteria(&record, &criteria));
}

#[test]
fn criteria_search_over_collection() {
    let records = fixture();
    let criteria = criteria_from_json(
        r#"[
            {"field": "overview.status", "operator": "is_empty"},
            {"field": "criteria[0].sex", "operator": "in", "value": ["female"], "logic": "OR"}
        ]"#,
    )
    .unwrap();
    assert_eq!(ids(search_records(&records, &criteria)), vec!["NCT-001", "NCT-003"]);
}
