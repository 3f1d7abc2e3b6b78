//! Normalization of trial field values.
//!
//! - **formatter**: display labels and comparison keys
//! - **enums**: trial phase and line-of-therapy synonym tables
//! - **datetime**: free-text date parsing and storage formatting
//! - **date_picker**: month/day/year picker composition
//!
//! Everything here is a pure function of its input.

pub mod date_picker;
pub mod datetime;
pub mod enums;
pub mod formatter;

pub use date_picker::{PickerOutput, SegmentedDate, is_leap_year, max_day_for_month};
pub use datetime::{
    DateCommit, DateField, DateParser, format_for_display, format_for_storage, parse_date_input,
    parse_storage_date,
};
pub use enums::{line_of_therapy_equal, line_of_therapy_label, phase_label, phases_equal};
pub use formatter::{format_value, normalize_for_comparison, values_equivalent};
