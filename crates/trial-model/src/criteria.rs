//! Ad-hoc search criteria.
//!
//! A criteria list is folded strictly left to right. Each criterion's
//! `logic` says how its own result combines with everything before it.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How a criterion combines with the running result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogicOperator {
    #[default]
    #[serde(rename = "AND", alias = "and", alias = "And")]
    And,
    #[serde(rename = "OR", alias = "or", alias = "Or")]
    Or,
}

/// Comparison applied between the record value and the criterion value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOperator {
    #[serde(alias = "eq", alias = "is")]
    Equals,
    #[serde(alias = "notEquals", alias = "ne", alias = "is_not")]
    NotEquals,
    Contains,
    #[serde(alias = "notContains")]
    NotContains,
    #[serde(alias = "startsWith")]
    StartsWith,
    #[serde(alias = "endsWith")]
    EndsWith,
    #[serde(rename = "in", alias = "in_set", alias = "inSet")]
    In,
    #[serde(alias = "notIn")]
    NotIn,
    #[serde(alias = "isEmpty")]
    IsEmpty,
    #[serde(alias = "isNotEmpty")]
    IsNotEmpty,
    /// Any operator name this engine does not know. Never matches.
    #[serde(other)]
    Unsupported,
}

impl SearchOperator {
    /// Operators whose result is the negation of a positive comparison.
    pub fn is_negated(self) -> bool {
        matches!(
            self,
            SearchOperator::NotEquals | SearchOperator::NotContains | SearchOperator::NotIn
        )
    }
}

/// A criterion value: one string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CriterionValue {
    One(String),
    Many(Vec<String>),
}

impl Default for CriterionValue {
    fn default() -> Self {
        CriterionValue::One(String::new())
    }
}

impl CriterionValue {
    pub fn values(&self) -> &[String] {
        match self {
            CriterionValue::One(value) => std::slice::from_ref(value),
            CriterionValue::Many(values) => values,
        }
    }
}

impl From<&str> for CriterionValue {
    fn from(value: &str) -> Self {
        CriterionValue::One(value.to_string())
    }
}

impl From<Vec<&str>> for CriterionValue {
    fn from(values: Vec<&str>) -> Self {
        CriterionValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// One `{field, operator, value, logic}` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriterion {
    #[serde(default)]
    pub id: String,
    pub field: String,
    #[serde(alias = "op")]
    pub operator: SearchOperator,
    #[serde(default)]
    pub value: CriterionValue,
    #[serde(default)]
    pub logic: LogicOperator,
}

impl SearchCriterion {
    pub fn new(
        field: impl Into<String>,
        operator: SearchOperator,
        value: impl Into<CriterionValue>,
    ) -> Self {
        Self {
            id: String::new(),
            field: field.into(),
            operator,
            value: value.into(),
            logic: LogicOperator::And,
        }
    }

    pub fn with_logic(mut self, logic: LogicOperator) -> Self {
        self.logic = logic;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Decode a criteria list from JSON.
pub fn criteria_from_json(json: &str) -> Result<Vec<SearchCriterion>> {
    Ok(serde_json::from_str(json)?)
}
