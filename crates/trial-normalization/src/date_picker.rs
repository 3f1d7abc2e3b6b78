//! Month/day/year picker.
//!
//! The three parts are edited independently. After every change the picker
//! reports one of three outcomes:
//!
//! ```text
//! all three set    -> Complete("YYYY-MM-DD"), day clamped to the month
//! all three empty  -> Cleared (store an empty string)
//! anything else    -> Incomplete (emit nothing yet)
//! ```

use chrono::{Datelike, NaiveDate};

use crate::datetime::{format_for_storage, parse_storage_date};

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
pub fn max_day_for_month(month: u32, year: i32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// What the picker emits after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutput {
    Complete(String),
    Cleared,
    Incomplete,
}

impl PickerOutput {
    /// Value to store, if the picker has one to emit.
    pub fn storage_value(&self) -> Option<&str> {
        match self {
            PickerOutput::Complete(value) => Some(value),
            PickerOutput::Cleared => Some(""),
            PickerOutput::Incomplete => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentedDate {
    month: Option<u32>,
    day: Option<u32>,
    year: Option<i32>,
}

impl SegmentedDate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a stored `YYYY-MM-DD` value. Unreadable values start empty.
    pub fn from_storage(stored: &str) -> Self {
        match parse_storage_date(stored) {
            Some(date) => Self {
                month: Some(date.month()),
                day: Some(date.day()),
                year: Some(date.year()),
            },
            None => Self::default(),
        }
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn day(&self) -> Option<u32> {
        self.day
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Select a month (1-12). Out-of-range values clear the month.
    pub fn set_month(&mut self, month: Option<u32>) -> PickerOutput {
        self.month = month.filter(|month| (1..=12).contains(month));
        self.emit()
    }

    /// Select a four-digit year. Other values clear the year.
    pub fn set_year(&mut self, year: Option<i32>) -> PickerOutput {
        self.year = year.filter(|year| (1000..=9999).contains(year));
        self.emit()
    }

    /// Apply the text of the day input (on blur).
    ///
    /// Anything other than a positive integer clears the day.
    pub fn set_day_text(&mut self, text: &str) -> PickerOutput {
        self.day = text.trim().parse::<u32>().ok().filter(|day| *day > 0);
        self.emit()
    }

    pub fn clear(&mut self) -> PickerOutput {
        *self = Self::default();
        self.emit()
    }

    /// The composed date when all three parts are set.
    pub fn date(&self) -> Option<NaiveDate> {
        let (month, day, year) = (self.month?, self.day?, self.year?);
        NaiveDate::from_ymd_opt(year, month, day.min(max_day_for_month(month, year)))
    }

    fn emit(&mut self) -> PickerOutput {
        match (self.month, self.day, self.year) {
            (Some(month), Some(day), Some(year)) => {
                let clamped = day.min(max_day_for_month(month, year));
                self.day = Some(clamped);
                match NaiveDate::from_ymd_opt(year, month, clamped) {
                    Some(date) => PickerOutput::Complete(format_for_storage(date)),
                    None => PickerOutput::Incomplete,
                }
            }
            (None, None, None) => PickerOutput::Cleared,
            _ => PickerOutput::Incomplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(max_day_for_month(2, 2024), 29);
        assert_eq!(max_day_for_month(2, 2023), 28);
        assert_eq!(max_day_for_month(4, 2024), 30);
        assert_eq!(max_day_for_month(12, 2024), 31);
    }

    #[test]
    fn day_is_clamped_to_leap_february() {
        let mut picker = SegmentedDate::new();
        assert_eq!(picker.set_month(Some(2)), PickerOutput::Incomplete);
        assert_eq!(picker.set_year(Some(2024)), PickerOutput::Incomplete);
        assert_eq!(
            picker.set_day_text("30"),
            PickerOutput::Complete("2024-02-29".to_string())
        );
        assert_eq!(picker.day(), Some(29));
    }

    #[test]
    fn day_is_clamped_to_thirty_day_month() {
        let mut picker = SegmentedDate::from_storage("2024-01-31");
        assert_eq!(
            picker.set_month(Some(4)),
            PickerOutput::Complete("2024-04-30".to_string())
        );
    }

    #[test]
    fn clearing_every_part_emits_empty_value() {
        let mut picker = SegmentedDate::from_storage("2024-03-10");
        assert_eq!(picker.set_month(None), PickerOutput::Incomplete);
        assert_eq!(picker.set_day_text(""), PickerOutput::Incomplete);
        let output = picker.set_year(None);
        assert_eq!(output, PickerOutput::Cleared);
        assert_eq!(output.storage_value(), Some(""));
    }

    #[test]
    fn invalid_parts_are_dropped() {
        let mut picker = SegmentedDate::new();
        picker.set_month(Some(13));
        assert_eq!(picker.month(), None);
        picker.set_day_text("abc");
        assert_eq!(picker.day(), None);
        assert_eq!(SegmentedDate::from_storage("garbage"), SegmentedDate::default());
    }
}
