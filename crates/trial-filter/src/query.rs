//! Record predicates.
//!
//! Filter state and search criteria are both record predicates. A
//! [`TrialQuery`] applies the two together, which is what the console's
//! record list does.

use trial_model::{SearchCriterion, TherapeuticFilterState, TrialRecord};

use crate::filter::passes_filters;
use crate::search::evaluate_criteria;

/// Decides whether a trial record is included.
pub trait RecordPredicate {
    fn matches(&self, record: &TrialRecord) -> bool;
}

impl RecordPredicate for TherapeuticFilterState {
    fn matches(&self, record: &TrialRecord) -> bool {
        passes_filters(record, self)
    }
}

impl RecordPredicate for [SearchCriterion] {
    fn matches(&self, record: &TrialRecord) -> bool {
        evaluate_criteria(record, self)
    }
}

impl RecordPredicate for Vec<SearchCriterion> {
    fn matches(&self, record: &TrialRecord) -> bool {
        evaluate_criteria(record, self)
    }
}

/// Filter state and search criteria applied together (AND).
#[derive(Debug, Clone, Default)]
pub struct TrialQuery {
    pub filters: TherapeuticFilterState,
    pub criteria: Vec<SearchCriterion>,
}

impl TrialQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(mut self, filters: TherapeuticFilterState) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_criteria(mut self, criteria: Vec<SearchCriterion>) -> Self {
        self.criteria = criteria;
        self
    }

    /// True when neither filters nor criteria would exclude anything.
    pub fn is_unrestricted(&self) -> bool {
        self.filters.is_empty() && self.criteria.is_empty()
    }
}

impl RecordPredicate for TrialQuery {
    fn matches(&self, record: &TrialRecord) -> bool {
        self.filters.matches(record) && self.criteria.matches(record)
    }
}

/// Records accepted by `predicate`, in input order.
pub fn select_records<'a, P>(records: &'a [TrialRecord], predicate: &P) -> Vec<&'a TrialRecord>
where
    P: RecordPredicate + ?Sized,
{
    records
        .iter()
        .filter(|record| predicate.matches(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trial_model::{FieldSelector, FilterDimension, SearchOperator};

    #[test]
    fn query_requires_filters_and_criteria() {
        let records = vec![
            TrialRecord::new()
                .with_id("a")
                .with_field(&FieldSelector::Status.field_path(), "Active")
                .with_field(&FieldSelector::TrialPhase.field_path(), "phase_2"),
            TrialRecord::new()
                .with_id("b")
                .with_field(&FieldSelector::Status.field_path(), "Active")
                .with_field(&FieldSelector::TrialPhase.field_path(), "phase_3"),
            TrialRecord::new()
                .with_id("c")
                .with_field(&FieldSelector::Status.field_path(), "Closed"),
        ];

        let query = TrialQuery::new()
            .with_filters(
                TherapeuticFilterState::new().with_values(FilterDimension::Statuses, ["active"]),
            )
            .with_criteria(vec![SearchCriterion::new(
                "trial_phase",
                SearchOperator::Equals,
                "Phase 2",
            )]);

        let ids: Vec<_> = select_records(&records, &query)
            .into_iter()
            .filter_map(TrialRecord::display_id)
            .collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn unrestricted_query_selects_everything() {
        let records = vec![TrialRecord::new(), TrialRecord::new().with_id("x")];
        let query = TrialQuery::new();
        assert!(query.is_unrestricted());
        assert_eq!(select_records(&records, &query).len(), 2);
    }
}
