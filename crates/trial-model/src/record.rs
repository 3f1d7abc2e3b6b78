//! Trial record model.
//!
//! A trial is an aggregate of named sub-records. Each sub-record is a loose
//! attribute map whose values may be absent, null, blank, scalar or (rarely)
//! a list. Every accessor here tolerates all of those shapes.
//!
//! ## Sections
//!
//! ```text
//! overview      single sub-record (trial phase, status, sponsors, ...)
//! criteria[]    eligibility criteria (sex, healthy volunteers, ...)
//! results[]     outcomes
//! timing[]      enrollment and duration milestones
//! sites[]       participating sites
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// A single attribute value inside a sub-record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Scalar text form of the value.
    ///
    /// Integral numbers render without a fractional part. Null and lists have
    /// no scalar form.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Text(text) => Some(Cow::Borrowed(text.as_str())),
            FieldValue::Number(number) => Some(Cow::Owned(number.to_string())),
            FieldValue::Bool(flag) => Some(Cow::Owned(flag.to_string())),
            FieldValue::Null | FieldValue::List(_) => None,
        }
    }

    /// Returns true for null, whitespace-only text, and lists of blanks.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::List(items) => items.iter().all(FieldValue::is_blank),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldValue::List(_))
    }

    /// Scalar text of each list element (nested lists are flattened).
    ///
    /// A scalar value yields itself as the single element.
    pub fn list_items(&self) -> Vec<Cow<'_, str>> {
        let mut items = Vec::new();
        collect_items(self, &mut items);
        items
    }
}

fn collect_items<'a>(value: &'a FieldValue, out: &mut Vec<Cow<'a, str>>) {
    match value {
        FieldValue::List(items) => {
            for item in items {
                collect_items(item, out);
            }
        }
        other => {
            if let Some(text) = other.as_text() {
                out.push(text);
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::List(values.into_iter().map(FieldValue::from).collect())
    }
}

/// Attribute name -> value map.
pub type SubRecord = BTreeMap<String, FieldValue>;

/// The named sub-record groups of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSection {
    Overview,
    Criteria,
    Results,
    Timing,
    Sites,
}

impl RecordSection {
    pub const ALL: [RecordSection; 5] = [
        RecordSection::Overview,
        RecordSection::Criteria,
        RecordSection::Results,
        RecordSection::Timing,
        RecordSection::Sites,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordSection::Overview => "overview",
            RecordSection::Criteria => "criteria",
            RecordSection::Results => "results",
            RecordSection::Timing => "timing",
            RecordSection::Sites => "sites",
        }
    }

    /// Case-insensitive lookup by section name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// Location of one attribute inside a trial record.
///
/// Written as `section[index].attribute`; `section.attribute` means index 0.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath {
    pub section: RecordSection,
    pub index: usize,
    pub attribute: String,
}

impl FieldPath {
    pub fn new(section: RecordSection, index: usize, attribute: impl Into<String>) -> Self {
        Self {
            section,
            index,
            attribute: attribute.into(),
        }
    }

    /// Parse a path such as `criteria[0].sex` or `overview.trial_phase`.
    ///
    /// Returns `None` for anything that is not a well-formed path.
    pub fn parse(path: &str) -> Option<Self> {
        let (head, attribute) = path.trim().split_once('.')?;
        let attribute = attribute.trim();
        if attribute.is_empty() || attribute.contains(['.', '[', ']']) {
            return None;
        }

        let (name, index) = match head.split_once('[') {
            Some((name, rest)) => {
                let digits = rest.strip_suffix(']')?;
                (name, digits.trim().parse::<usize>().ok()?)
            }
            None => (head, 0),
        };

        let section = RecordSection::from_name(name)?;
        if section == RecordSection::Overview && index != 0 {
            return None;
        }
        Some(Self::new(section, index, attribute))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.section {
            RecordSection::Overview => write!(f, "overview.{}", self.attribute),
            section => write!(f, "{}[{}].{}", section.as_str(), self.index, self.attribute),
        }
    }
}

/// One clinical trial with its sub-records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    #[serde(default)]
    pub id: FieldValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: SubRecord,
    #[serde(default, deserialize_with = "null_as_default")]
    pub criteria: Vec<SubRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SubRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timing: Vec<SubRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sites: Vec<SubRecord>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl TrialRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display identifier, if the record carries one.
    pub fn display_id(&self) -> Option<String> {
        self.id.as_text().map(Cow::into_owned)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = FieldValue::Text(id.into());
        self
    }

    /// Set an attribute, growing list sections as needed.
    pub fn with_field(mut self, path: &FieldPath, value: impl Into<FieldValue>) -> Self {
        self.set(path, value);
        self
    }

    pub fn set(&mut self, path: &FieldPath, value: impl Into<FieldValue>) {
        if path.section == RecordSection::Overview {
            self.overview.insert(path.attribute.clone(), value.into());
            return;
        }
        let Some(list) = self.section_list_mut(path.section) else {
            return;
        };
        if list.len() <= path.index {
            list.resize_with(path.index + 1, SubRecord::new);
        }
        list[path.index].insert(path.attribute.clone(), value.into());
    }

    /// Sub-record at `section[index]`, if present.
    pub fn section(&self, section: RecordSection, index: usize) -> Option<&SubRecord> {
        match section {
            RecordSection::Overview => (index == 0).then_some(&self.overview),
            RecordSection::Criteria => self.criteria.get(index),
            RecordSection::Results => self.results.get(index),
            RecordSection::Timing => self.timing.get(index),
            RecordSection::Sites => self.sites.get(index),
        }
    }

    fn section_list_mut(&mut self, section: RecordSection) -> Option<&mut Vec<SubRecord>> {
        match section {
            RecordSection::Overview => None,
            RecordSection::Criteria => Some(&mut self.criteria),
            RecordSection::Results => Some(&mut self.results),
            RecordSection::Timing => Some(&mut self.timing),
            RecordSection::Sites => Some(&mut self.sites),
        }
    }

    /// Value at `path`, or `None` when the section or attribute is absent.
    pub fn resolve(&self, path: &FieldPath) -> Option<&FieldValue> {
        self.section(path.section, path.index)?.get(&path.attribute)
    }

    /// Resolve a field reference used by search criteria.
    ///
    /// Accepts a full path, or a bare attribute name searched in the overview
    /// first and then the first entry of each list section.
    pub fn resolve_field(&self, field: &str) -> Option<&FieldValue> {
        if let Some(path) = FieldPath::parse(field) {
            return self.resolve(&path);
        }
        let name = field.trim();
        if name.is_empty() {
            return None;
        }
        RecordSection::ALL
            .into_iter()
            .filter_map(|section| self.section(section, 0))
            .find_map(|sub_record| sub_record.get(name))
    }
}

/// Decode a record collection from JSON.
///
/// Accepts either a bare array or an object with a `trials` array.
pub fn load_records_json(json: &str) -> Result<Vec<TrialRecord>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Envelope {
        Bare(Vec<TrialRecord>),
        Wrapped { trials: Vec<TrialRecord> },
    }

    let records = match serde_json::from_str::<Envelope>(json)? {
        Envelope::Bare(records) | Envelope::Wrapped { trials: records } => records,
    };
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_text_drops_integral_fraction() {
        assert_eq!(FieldValue::Number(3.0).as_text().as_deref(), Some("3"));
        assert_eq!(FieldValue::Number(2.5).as_text().as_deref(), Some("2.5"));
    }

    #[test]
    fn blank_detection() {
        assert!(FieldValue::Null.is_blank());
        assert!(FieldValue::from("   ").is_blank());
        assert!(FieldValue::from(vec!["", " "]).is_blank());
        assert!(!FieldValue::from(vec!["", "x"]).is_blank());
        assert!(!FieldValue::Bool(false).is_blank());
    }

    #[test]
    fn list_items_flatten_nested_lists() {
        let value = FieldValue::List(vec![
            FieldValue::from("a"),
            FieldValue::List(vec![FieldValue::from("b"), FieldValue::Null]),
            FieldValue::Number(7.0),
        ]);
        let items: Vec<String> = value.list_items().into_iter().map(Cow::into_owned).collect();
        assert_eq!(items, vec!["a", "b", "7"]);
    }

    #[test]
    fn path_parse_forms() {
        let path = FieldPath::parse("criteria[2].sex").unwrap();
        assert_eq!(path.section, RecordSection::Criteria);
        assert_eq!(path.index, 2);
        assert_eq!(path.attribute, "sex");

        let path = FieldPath::parse("results.trial_outcome").unwrap();
        assert_eq!(path.index, 0);
        assert_eq!(path.to_string(), "results[0].trial_outcome");

        assert_eq!(
            FieldPath::parse("overview.trial_phase").unwrap().to_string(),
            "overview.trial_phase"
        );
    }

    #[test]
    fn path_parse_rejects_malformed() {
        assert!(FieldPath::parse("status").is_none());
        assert!(FieldPath::parse("unknown.status").is_none());
        assert!(FieldPath::parse("criteria[x].sex").is_none());
        assert!(FieldPath::parse("criteria[0.sex").is_none());
        assert!(FieldPath::parse("overview[1].status").is_none());
        assert!(FieldPath::parse("overview.").is_none());
    }

    #[test]
    fn set_grows_list_sections() {
        let path = FieldPath::parse("timing[1].start_date").unwrap();
        let record = TrialRecord::new().with_field(&path, "2024-01-05");
        assert_eq!(record.timing.len(), 2);
        assert!(record.timing[0].is_empty());
        assert_eq!(record.resolve(&path), Some(&FieldValue::from("2024-01-05")));
    }

    #[test]
    fn bare_field_prefers_overview() {
        let record = TrialRecord::new()
            .with_field(&FieldPath::parse("criteria.status").unwrap(), "criteria")
            .with_field(&FieldPath::parse("overview.status").unwrap(), "overview");
        assert_eq!(record.resolve_field("status"), Some(&FieldValue::from("overview")));
        assert_eq!(record.resolve_field("missing"), None);
        assert_eq!(record.resolve_field(""), None);
    }
}
