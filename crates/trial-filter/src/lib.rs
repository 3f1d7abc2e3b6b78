//! Filtering of trial records.
//!
//! - **extract**: distinct values for filter dropdowns
//! - **filter**: multi-select filter state evaluation
//! - **search**: ordered search criteria evaluation
//! - **query**: filter state and criteria as record predicates

pub mod extract;
pub mod filter;
pub mod query;
pub mod search;

pub use extract::{
    FieldOption, distinct_values, extract_field_options, extract_selector_options,
    split_field_value,
};
pub use filter::{dimension_matches, filter_records, passes_filters, values_match};
pub use query::{RecordPredicate, TrialQuery, select_records};
pub use search::{criterion_matches, evaluate_criteria, search_records};
