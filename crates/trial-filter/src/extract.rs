//! Distinct values for filter dropdowns.
//!
//! Multi-value fields are stored inconsistently in source data, so a single
//! raw value is split with a fixed precedence:
//!
//! ```text
//! array     -> each element
//! newline   -> split on runs of newlines (commas are kept)
//! comma     -> split on commas
//! otherwise -> the whole value
//! ```
//!
//! Swapping the newline and comma rules changes sponsor dropdowns for real
//! data, where `"Pfizer, Inc.\nMerck"` names two sponsors, not three.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use trial_model::{FieldPath, FieldSelector, FieldValue, TrialRecord};

static NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("Invalid newline regex"));

/// A dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Split one raw value into its trimmed, non-empty parts.
pub fn split_field_value(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::Null => Vec::new(),
        FieldValue::List(_) => value
            .list_items()
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        scalar => scalar
            .as_text()
            .map(|text| split_text(&text))
            .unwrap_or_default(),
    }
}

fn split_text(text: &str) -> Vec<String> {
    let parts: Vec<&str> = if text.contains(['\n', '\r']) {
        NEWLINE_RUN.split(text).collect()
    } else if text.contains(',') {
        text.split(',').collect()
    } else {
        vec![text]
    };

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distinct split values at `path`, in byte order.
pub fn distinct_values(records: &[TrialRecord], path: &FieldPath) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(|record| record.resolve(path))
        .flat_map(split_field_value)
        .collect()
}

/// Dropdown options for a supported selector.
pub fn extract_selector_options(
    records: &[TrialRecord],
    selector: FieldSelector,
) -> Vec<FieldOption> {
    distinct_values(records, &selector.field_path())
        .into_iter()
        .map(FieldOption::new)
        .collect()
}

/// Dropdown options for a selector path such as `criteria[0].sex`.
///
/// Unsupported paths yield no options.
pub fn extract_field_options(records: &[TrialRecord], selector_path: &str) -> Vec<FieldOption> {
    match FieldSelector::from_path(selector_path) {
        Some(selector) => extract_selector_options(records, selector),
        None => {
            tracing::debug!(path = %selector_path, "unsupported field selector");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(value: FieldValue) -> Vec<String> {
        split_field_value(&value)
    }

    #[test]
    fn newline_takes_precedence_over_comma() {
        assert_eq!(
            texts(FieldValue::from("Pfizer, Inc.\n\n Merck ")),
            vec!["Pfizer, Inc.", "Merck"]
        );
        assert_eq!(texts(FieldValue::from("A\r\nB")), vec!["A", "B"]);
    }

    #[test]
    fn comma_split_drops_empty_segments() {
        assert_eq!(texts(FieldValue::from("Pfizer, ,Roche,")), vec!["Pfizer", "Roche"]);
    }

    #[test]
    fn arrays_are_not_split_further() {
        assert_eq!(
            texts(FieldValue::from(vec![" Novartis ", "", "Bayer, AG"])),
            vec!["Novartis", "Bayer, AG"]
        );
    }

    #[test]
    fn scalars_and_blanks() {
        assert_eq!(texts(FieldValue::Number(2.0)), vec!["2"]);
        assert_eq!(texts(FieldValue::Bool(true)), vec!["true"]);
        assert!(texts(FieldValue::Null).is_empty());
        assert!(texts(FieldValue::from("   ")).is_empty());
    }

    #[test]
    fn unsupported_selector_has_no_options() {
        let records = vec![TrialRecord::new()];
        assert!(extract_field_options(&records, "overview.unknown").is_empty());
        assert!(extract_field_options(&records, "not a path").is_empty());
    }
}
