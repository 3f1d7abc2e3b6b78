//! Multi-select filter state.
//!
//! The console keeps one set of accepted raw values per dimension. An empty
//! set means the dimension is inactive.
//!
//! ## JSON form
//!
//! ```text
//! { "therapeuticAreas": ["oncology"], "trialPhases": ["Phase I/II"] }
//! ```
//!
//! Unknown dimension names are dropped on load so that saved UI state keeps
//! loading after dimensions are added or retired.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrialModelError};
use crate::selector::FieldSelector;

/// How a dimension compares record values with accepted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    /// `normalize_for_comparison` equality.
    Generic,
    /// Phase synonym classes.
    Phase,
    /// Line-of-therapy synonym classes.
    LineOfTherapy,
}

/// Static wiring of a dimension to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionBinding {
    pub selector: FieldSelector,
    pub comparison: ComparisonMode,
    /// The field holds several values (array or delimited text).
    pub list_valued: bool,
}

/// A named filterable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterDimension {
    TherapeuticAreas,
    DiseaseTypes,
    PatientSegments,
    TrialPhases,
    Statuses,
    LineOfTherapy,
    Sponsors,
    Countries,
    Biomarkers,
    Sex,
    TrialOutcomes,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 11] = [
        FilterDimension::TherapeuticAreas,
        FilterDimension::DiseaseTypes,
        FilterDimension::PatientSegments,
        FilterDimension::TrialPhases,
        FilterDimension::Statuses,
        FilterDimension::LineOfTherapy,
        FilterDimension::Sponsors,
        FilterDimension::Countries,
        FilterDimension::Biomarkers,
        FilterDimension::Sex,
        FilterDimension::TrialOutcomes,
    ];

    /// camelCase name used in saved state.
    pub fn name(self) -> &'static str {
        match self {
            FilterDimension::TherapeuticAreas => "therapeuticAreas",
            FilterDimension::DiseaseTypes => "diseaseTypes",
            FilterDimension::PatientSegments => "patientSegments",
            FilterDimension::TrialPhases => "trialPhases",
            FilterDimension::Statuses => "statuses",
            FilterDimension::LineOfTherapy => "lineOfTherapy",
            FilterDimension::Sponsors => "sponsors",
            FilterDimension::Countries => "countries",
            FilterDimension::Biomarkers => "biomarkers",
            FilterDimension::Sex => "sex",
            FilterDimension::TrialOutcomes => "trialOutcomes",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|dimension| dimension.name().eq_ignore_ascii_case(name))
    }

    pub fn binding(self) -> DimensionBinding {
        let (selector, comparison, list_valued) = match self {
            FilterDimension::TherapeuticAreas => {
                (FieldSelector::TherapeuticArea, ComparisonMode::Generic, false)
            }
            FilterDimension::DiseaseTypes => {
                (FieldSelector::DiseaseType, ComparisonMode::Generic, false)
            }
            FilterDimension::PatientSegments => {
                (FieldSelector::PatientSegment, ComparisonMode::Generic, true)
            }
            FilterDimension::TrialPhases => {
                (FieldSelector::TrialPhase, ComparisonMode::Phase, false)
            }
            FilterDimension::Statuses => (FieldSelector::Status, ComparisonMode::Generic, false),
            FilterDimension::LineOfTherapy => (
                FieldSelector::LineOfTherapy,
                ComparisonMode::LineOfTherapy,
                true,
            ),
            FilterDimension::Sponsors => (
                FieldSelector::SponsorCollaborators,
                ComparisonMode::Generic,
                true,
            ),
            FilterDimension::Countries => {
                (FieldSelector::Countries, ComparisonMode::Generic, true)
            }
            FilterDimension::Biomarkers => {
                (FieldSelector::Biomarker, ComparisonMode::Generic, true)
            }
            FilterDimension::Sex => (FieldSelector::Sex, ComparisonMode::Generic, false),
            FilterDimension::TrialOutcomes => {
                (FieldSelector::TrialOutcome, ComparisonMode::Generic, false)
            }
        };
        DimensionBinding {
            selector,
            comparison,
            list_valued,
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterDimension {
    type Err = TrialModelError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(value).ok_or_else(|| TrialModelError::UnknownDimension(value.to_string()))
    }
}

/// Accepted values per dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, BTreeSet<String>>",
    into = "BTreeMap<String, BTreeSet<String>>"
)]
pub struct TherapeuticFilterState {
    selections: BTreeMap<FilterDimension, BTreeSet<String>>,
}

impl TherapeuticFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add accepted values to a dimension.
    pub fn with_values<I, S>(mut self, dimension: FilterDimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.insert(dimension, value);
        }
        self
    }

    pub fn insert(&mut self, dimension: FilterDimension, value: impl Into<String>) {
        self.selections.entry(dimension).or_default().insert(value.into());
    }

    /// Remove a single accepted value. Returns true if it was present.
    pub fn remove(&mut self, dimension: FilterDimension, value: &str) -> bool {
        self.selections
            .get_mut(&dimension)
            .is_some_and(|values| values.remove(value))
    }

    pub fn clear_dimension(&mut self, dimension: FilterDimension) {
        self.selections.remove(&dimension);
    }

    /// Accepted values for a dimension (empty when inactive).
    pub fn values(&self, dimension: FilterDimension) -> impl Iterator<Item = &str> {
        self.selections
            .get(&dimension)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn is_active(&self, dimension: FilterDimension) -> bool {
        self.selections
            .get(&dimension)
            .is_some_and(|values| !values.is_empty())
    }

    /// Dimensions with at least one accepted value, in declaration order.
    pub fn active_dimensions(&self) -> impl Iterator<Item = FilterDimension> + '_ {
        self.selections
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(dimension, _)| *dimension)
    }

    /// True when no dimension is active.
    pub fn is_empty(&self) -> bool {
        self.active_dimensions().next().is_none()
    }
}

impl From<BTreeMap<String, BTreeSet<String>>> for TherapeuticFilterState {
    fn from(raw: BTreeMap<String, BTreeSet<String>>) -> Self {
        let selections = raw
            .into_iter()
            .filter_map(|(name, values)| Some((FilterDimension::from_name(&name)?, values)))
            .collect();
        Self { selections }
    }
}

impl From<TherapeuticFilterState> for BTreeMap<String, BTreeSet<String>> {
    fn from(state: TherapeuticFilterState) -> Self {
        state
            .selections
            .into_iter()
            .map(|(dimension, values)| (dimension.name().to_string(), values))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sets_are_inactive() {
        let mut state = TherapeuticFilterState::new();
        assert!(state.is_empty());

        state.insert(FilterDimension::Statuses, "Active");
        assert!(state.is_active(FilterDimension::Statuses));
        assert!(state.remove(FilterDimension::Statuses, "Active"));
        assert!(!state.is_active(FilterDimension::Statuses));
        assert!(state.is_empty());
    }

    #[test]
    fn json_keys_use_camel_case_names() {
        let state = TherapeuticFilterState::new()
            .with_values(FilterDimension::TrialPhases, ["Phase I"])
            .with_values(FilterDimension::LineOfTherapy, ["first_line"]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"trialPhases": ["Phase I"], "lineOfTherapy": ["first_line"]})
        );
    }

    #[test]
    fn unknown_dimensions_are_dropped_on_load() {
        let state = TherapeuticFilterState::from_json(
            r#"{"statuses": ["Active"], "retiredDimension": ["x"], "sex": []}"#,
        )
        .unwrap();
        let active: Vec<_> = state.active_dimensions().collect();
        assert_eq!(active, vec![FilterDimension::Statuses]);
    }

    #[test]
    fn dimension_names_parse_case_insensitively() {
        assert_eq!(
            "TrialPhases".parse::<FilterDimension>().unwrap(),
            FilterDimension::TrialPhases
        );
        assert!(matches!(
            "nope".parse::<FilterDimension>(),
            Err(TrialModelError::UnknownDimension(_))
        ));
    }

    #[test]
    fn phase_and_line_dimensions_use_synonym_comparison() {
        assert_eq!(
            FilterDimension::TrialPhases.binding().comparison,
            ComparisonMode::Phase
        );
        assert_eq!(
            FilterDimension::LineOfTherapy.binding().comparison,
            ComparisonMode::LineOfTherapy
        );
        assert!(FilterDimension::Sponsors.binding().list_valued);
        assert!(!FilterDimension::Statuses.binding().list_valued);
    }
}
