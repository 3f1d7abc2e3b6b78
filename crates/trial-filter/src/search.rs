//! Ad-hoc search criteria evaluation.
//!
//! Criteria fold strictly left to right with no precedence:
//!
//! ```text
//! result = matches(c0)
//! result = result AND/OR matches(ci)   for i = 1..n, using ci.logic
//! ```
//!
//! `a OR b AND c` is therefore `(a OR b) AND c`.

use trial_model::{FieldValue, LogicOperator, SearchCriterion, SearchOperator, TrialRecord};
use trial_normalization::normalize_for_comparison;

/// Comparison keys of the record value, or `None` when the field is absent
/// or null.
fn record_keys(value: Option<&FieldValue>) -> Option<Vec<String>> {
    match value? {
        FieldValue::Null => None,
        list @ FieldValue::List(_) => Some(
            list.list_items()
                .iter()
                .map(|item| normalize_for_comparison(item))
                .collect(),
        ),
        scalar => scalar
            .as_text()
            .map(|text| vec![normalize_for_comparison(&text)]),
    }
}

fn positive_match(operator: SearchOperator, candidate: &str, target: &str) -> bool {
    match operator {
        SearchOperator::Equals
        | SearchOperator::NotEquals
        | SearchOperator::In
        | SearchOperator::NotIn => candidate == target,
        SearchOperator::Contains | SearchOperator::NotContains => candidate.contains(target),
        SearchOperator::StartsWith => candidate.starts_with(target),
        SearchOperator::EndsWith => candidate.ends_with(target),
        SearchOperator::IsEmpty | SearchOperator::IsNotEmpty | SearchOperator::Unsupported => {
            false
        }
    }
}

/// Whether a single criterion holds for `record`.
///
/// An absent or null field only satisfies `is_empty`. Unsupported operators
/// never match.
pub fn criterion_matches(record: &TrialRecord, criterion: &SearchCriterion) -> bool {
    let value = record.resolve_field(&criterion.field);

    match criterion.operator {
        SearchOperator::Unsupported => {
            tracing::debug!(field = %criterion.field, "unsupported search operator");
            return false;
        }
        SearchOperator::IsEmpty => return value.is_none_or(FieldValue::is_blank),
        SearchOperator::IsNotEmpty => return value.is_some_and(|value| !value.is_blank()),
        _ => {}
    }

    let Some(candidates) = record_keys(value) else {
        return false;
    };
    let targets: Vec<String> = criterion
        .value
        .values()
        .iter()
        .map(|target| normalize_for_comparison(target))
        .collect();

    let any_match = candidates.iter().any(|candidate| {
        targets
            .iter()
            .any(|target| positive_match(criterion.operator, candidate, target))
    });

    if criterion.operator.is_negated() {
        !any_match
    } else {
        any_match
    }
}

/// Fold a criteria list into one decision. An empty list matches.
pub fn evaluate_criteria(record: &TrialRecord, criteria: &[SearchCriterion]) -> bool {
    let Some((first, rest)) = criteria.split_first() else {
        return true;
    };

    rest.iter()
        .fold(criterion_matches(record, first), |result, criterion| {
            match criterion.logic {
                LogicOperator::And => result && criterion_matches(record, criterion),
                LogicOperator::Or => result || criterion_matches(record, criterion),
            }
        })
}

/// Records matching `criteria`, in input order.
pub fn search_records<'a>(
    records: &'a [TrialRecord],
    criteria: &[SearchCriterion],
) -> Vec<&'a TrialRecord> {
    records
        .iter()
        .filter(|record| evaluate_criteria(record, criteria))
        .collect()
}
