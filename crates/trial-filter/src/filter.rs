//! Multi-select filter evaluation.
//!
//! Dimensions combine with AND. The accepted values of one dimension combine
//! with OR. Inactive dimensions (empty sets) never exclude a record.

use trial_model::{ComparisonMode, FilterDimension, TherapeuticFilterState, TrialRecord};
use trial_normalization::{line_of_therapy_equal, phases_equal, values_equivalent};

use crate::extract::split_field_value;

/// Compare a record value with an accepted value under `mode`.
pub fn values_match(mode: ComparisonMode, record_value: &str, accepted: &str) -> bool {
    match mode {
        ComparisonMode::Generic => values_equivalent(record_value, accepted),
        ComparisonMode::Phase => phases_equal(record_value, accepted),
        ComparisonMode::LineOfTherapy => line_of_therapy_equal(record_value, accepted),
    }
}

/// Whether `record` satisfies a single dimension of `state`.
///
/// Inactive dimensions always match. A missing or blank value never matches
/// an active dimension.
pub fn dimension_matches(
    record: &TrialRecord,
    state: &TherapeuticFilterState,
    dimension: FilterDimension,
) -> bool {
    if !state.is_active(dimension) {
        return true;
    }

    let binding = dimension.binding();
    let Some(value) = record.resolve(&binding.selector.field_path()) else {
        return false;
    };

    let candidates = if binding.list_valued || value.is_list() {
        split_field_value(value)
    } else {
        value
            .as_text()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .into_iter()
            .collect()
    };

    candidates.iter().any(|candidate| {
        state
            .values(dimension)
            .any(|accepted| values_match(binding.comparison, candidate, accepted))
    })
}

/// Whether `record` passes every active dimension.
pub fn passes_filters(record: &TrialRecord, state: &TherapeuticFilterState) -> bool {
    state
        .active_dimensions()
        .all(|dimension| dimension_matches(record, state, dimension))
}

/// Records that pass `state`, in input order.
pub fn filter_records<'a>(
    records: &'a [TrialRecord],
    state: &TherapeuticFilterState,
) -> Vec<&'a TrialRecord> {
    if state.is_empty() {
        return records.iter().collect();
    }
    let passing: Vec<_> = records
        .iter()
        .filter(|record| passes_filters(record, state))
        .collect();
    tracing::debug!(
        total = records.len(),
        passing = passing.len(),
        active = state.active_dimensions().count(),
        "applied filter state"
    );
    passing
}
