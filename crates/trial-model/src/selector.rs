//! Supported field selectors.
//!
//! Dropdowns and filter dimensions only ever address attributes from this
//! fixed list. Anything else is treated as unsupported by callers.

use std::fmt;
use std::str::FromStr;

use crate::error::TrialModelError;
use crate::record::{FieldPath, RecordSection};

/// An attribute exposed to the filter UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldSelector {
    TherapeuticArea,
    DiseaseType,
    PatientSegment,
    TrialPhase,
    Status,
    LineOfTherapy,
    SponsorCollaborators,
    Countries,
    Biomarker,
    Sex,
    HealthyVolunteers,
    EcogPerformanceStatus,
    TrialOutcome,
    AdverseEventReported,
    SiteCountry,
}

impl FieldSelector {
    /// All selectors in display order.
    pub const ALL: [FieldSelector; 15] = [
        FieldSelector::TherapeuticArea,
        FieldSelector::DiseaseType,
        FieldSelector::PatientSegment,
        FieldSelector::TrialPhase,
        FieldSelector::Status,
        FieldSelector::LineOfTherapy,
        FieldSelector::SponsorCollaborators,
        FieldSelector::Countries,
        FieldSelector::Biomarker,
        FieldSelector::Sex,
        FieldSelector::HealthyVolunteers,
        FieldSelector::EcogPerformanceStatus,
        FieldSelector::TrialOutcome,
        FieldSelector::AdverseEventReported,
        FieldSelector::SiteCountry,
    ];

    pub fn all() -> impl Iterator<Item = FieldSelector> {
        Self::ALL.into_iter()
    }

    fn location(self) -> (RecordSection, &'static str) {
        match self {
            FieldSelector::TherapeuticArea => (RecordSection::Overview, "therapeutic_area"),
            FieldSelector::DiseaseType => (RecordSection::Overview, "disease_type"),
            FieldSelector::PatientSegment => (RecordSection::Overview, "patient_segment"),
            FieldSelector::TrialPhase => (RecordSection::Overview, "trial_phase"),
            FieldSelector::Status => (RecordSection::Overview, "status"),
            FieldSelector::LineOfTherapy => (RecordSection::Overview, "line_of_therapy"),
            FieldSelector::SponsorCollaborators => {
                (RecordSection::Overview, "sponsor_collaborators")
            }
            FieldSelector::Countries => (RecordSection::Overview, "countries"),
            FieldSelector::Biomarker => (RecordSection::Overview, "biomarker"),
            FieldSelector::Sex => (RecordSection::Criteria, "sex"),
            FieldSelector::HealthyVolunteers => (RecordSection::Criteria, "healthy_volunteers"),
            FieldSelector::EcogPerformanceStatus => {
                (RecordSection::Criteria, "ecog_performance_status")
            }
            FieldSelector::TrialOutcome => (RecordSection::Results, "trial_outcome"),
            FieldSelector::AdverseEventReported => {
                (RecordSection::Results, "adverse_event_reported")
            }
            FieldSelector::SiteCountry => (RecordSection::Sites, "site_country"),
        }
    }

    /// Selectors always address the first entry of list sections.
    pub fn field_path(self) -> FieldPath {
        let (section, attribute) = self.location();
        FieldPath::new(section, 0, attribute)
    }

    /// Canonical path string, e.g. `criteria[0].sex`.
    pub fn path(self) -> String {
        self.field_path().to_string()
    }

    /// Look up a selector by path. Both `criteria[0].sex` and `criteria.sex`
    /// are accepted.
    pub fn from_path(path: &str) -> Option<Self> {
        let parsed = FieldPath::parse(path)?;
        Self::all().find(|selector| selector.field_path() == parsed)
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for FieldSelector {
    type Err = TrialModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_path(value).ok_or_else(|| TrialModelError::UnknownSelector(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_selector_resolves_from_its_path() {
        for selector in FieldSelector::all() {
            assert!(!selector.field_path().attribute.is_empty());
            assert_eq!(FieldSelector::from_path(&selector.path()), Some(selector));
        }
    }

    #[test]
    fn paths_match_documented_forms() {
        assert_eq!(FieldSelector::TrialPhase.path(), "overview.trial_phase");
        assert_eq!(FieldSelector::Sex.path(), "criteria[0].sex");
        assert_eq!(FieldSelector::TrialOutcome.path(), "results[0].trial_outcome");
    }

    #[test]
    fn shorthand_index_is_accepted() {
        assert_eq!(FieldSelector::from_path("criteria.sex"), Some(FieldSelector::Sex));
    }

    #[test]
    fn unsupported_paths_are_rejected() {
        assert_eq!(FieldSelector::from_path("criteria[1].sex"), None);
        assert_eq!(FieldSelector::from_path("overview.unknown"), None);
        assert!(matches!(
            "overview.unknown".parse::<FieldSelector>(),
            Err(TrialModelError::UnknownSelector(_))
        ));
    }
}
