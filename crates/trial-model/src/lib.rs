//! Trial record model.
//!
//! Definitions shared by the normalization and filtering crates:
//!
//! - **record**: loosely typed trial records and field paths
//! - **selector**: the fixed set of attributes exposed to dropdowns
//! - **filter_state**: multi-select filter dimensions
//! - **criteria**: ad-hoc search criteria

pub mod criteria;
pub mod error;
pub mod filter_state;
pub mod record;
pub mod selector;

pub use criteria::{
    CriterionValue, LogicOperator, SearchCriterion, SearchOperator, criteria_from_json,
};
pub use error::{Result, TrialModelError};
pub use filter_state::{ComparisonMode, DimensionBinding, FilterDimension, TherapeuticFilterState};
pub use record::{FieldPath, FieldValue, RecordSection, SubRecord, TrialRecord, load_records_json};
pub use selector::FieldSelector;
