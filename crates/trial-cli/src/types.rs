use chrono::NaiveDate;
use serde::Serialize;
use trial_filter::FieldOption;
use trial_model::{FieldSelector, FilterDimension, TrialRecord};

#[derive(Debug)]
pub struct OptionsResult {
    pub selector: FieldSelector,
    pub record_count: usize,
    pub options: Vec<FieldOption>,
}

#[derive(Debug, Serialize)]
pub struct FilterResult {
    pub total: usize,
    pub active_dimensions: Vec<FilterDimension>,
    pub criteria_count: usize,
    pub trials: Vec<TrialRecord>,
}

impl FilterResult {
    pub fn matched(&self) -> usize {
        self.trials.len()
    }
}

#[derive(Debug)]
pub struct DateResult {
    pub input: String,
    pub reference: NaiveDate,
    pub date: Option<NaiveDate>,
}
