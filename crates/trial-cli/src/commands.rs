use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use trial_filter::{TrialQuery, extract_selector_options, select_records};
use trial_model::{
    FieldSelector, SearchCriterion, TherapeuticFilterState, TrialRecord, criteria_from_json,
    load_records_json,
};
use trial_normalization::DateParser;

use crate::cli::{DateArgs, FilterArgs, OptionsArgs};
use crate::types::{DateResult, FilterResult, OptionsResult};

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

pub fn load_records(path: &Path) -> Result<Vec<TrialRecord>> {
    let json = read_file(path)?;
    let records =
        load_records_json(&json).with_context(|| format!("parse trials in {}", path.display()))?;
    debug!(path = %path.display(), count = records.len(), "loaded trial records");
    Ok(records)
}

pub fn load_filter_state(path: &Path) -> Result<TherapeuticFilterState> {
    let json = read_file(path)?;
    TherapeuticFilterState::from_json(&json)
        .with_context(|| format!("parse filter state in {}", path.display()))
}

pub fn load_criteria(path: &Path) -> Result<Vec<SearchCriterion>> {
    let json = read_file(path)?;
    criteria_from_json(&json).with_context(|| format!("parse search criteria in {}", path.display()))
}

pub fn run_options(args: &OptionsArgs) -> Result<OptionsResult> {
    let selector: FieldSelector = args.field.parse().context("resolve --field")?;
    let records = load_records(&args.records)?;
    let options = extract_selector_options(&records, selector);
    info!(field = %selector, options = options.len(), "extracted field options");
    Ok(OptionsResult {
        selector,
        record_count: records.len(),
        options,
    })
}

pub fn run_filter(args: &FilterArgs) -> Result<FilterResult> {
    let span = info_span!("filter", records = %args.records.display());
    let _guard = span.enter();

    let records = load_records(&args.records)?;
    let filters = match &args.filters {
        Some(path) => load_filter_state(path)?,
        None => TherapeuticFilterState::new(),
    };
    let criteria = match &args.criteria {
        Some(path) => load_criteria(path)?,
        None => Vec::new(),
    };

    let query = TrialQuery::new()
        .with_filters(filters)
        .with_criteria(criteria);
    let trials: Vec<TrialRecord> = select_records(&records, &query)
        .into_iter()
        .cloned()
        .collect();

    info!(
        total = records.len(),
        matched = trials.len(),
        "applied filters and criteria"
    );
    Ok(FilterResult {
        total: records.len(),
        active_dimensions: query.filters.active_dimensions().collect(),
        criteria_count: query.criteria.len(),
        trials,
    })
}

pub fn run_date(args: &DateArgs) -> DateResult {
    let mut parser = DateParser::new();
    if let Some(reference) = args.reference {
        parser = parser.with_reference_date(reference);
    }
    DateResult {
        input: args.input.clone(),
        reference: parser.reference_date(),
        date: parser.parse(&args.input),
    }
}
