//! Free-text date parsing and storage formatting.
//!
//! Dates typed into the console arrive in many shapes. [`DateParser`] tries
//! an explicit ordered list of patterns and the first one that yields a
//! valid calendar date wins. Order matters: `1/2/2024` is read US-style
//! (January 2) because the US patterns come before the European ones.
//!
//! A leading weekday (`Monday, `) is dropped before matching and is not
//! checked against the date. `Sept` is read as `Sep`.
//!
//! Parsed dates are stored as `YYYY-MM-DD` and shown as `MM-DD-YYYY`.

use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;

/// Storage format (`2024-01-05`).
pub const STORAGE_FORMAT: &str = "%Y-%m-%d";

/// Display format (`01-05-2024`).
pub const DISPLAY_FORMAT: &str = "%m-%d-%Y";

/// Patterns carrying a full year, in priority order.
///
/// `%B` also accepts abbreviated month names.
const DATED_FORMATS: &[&str] = &[
    "%B %d, %Y",  // January 5, 2024 / Jan 5, 2024
    "%b. %d, %Y", // Jan. 5, 2024
    "%B %d %Y",   // January 5 2024
    "%m/%d/%Y",      // US
    "%m-%d-%Y",
    "%Y-%m-%d", // ISO
    "%Y/%m/%d",
    "%d/%m/%Y", // European
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y.%m.%d",
    "%d %B %Y", // 5 January 2024
    "%d-%b-%Y", // 05-Jan-2024
    "%d-%B-%Y",
];

/// Patterns without a year, with the separator used to append the
/// reference year.
const YEARLESS_FORMATS: &[(&str, &str)] = &[
    ("%B %d", " "), // January 5
    ("%m/%d", "/"),
    ("%m-%d", "-"),
    ("%d %B", " "), // 5 January
];

static LEADING_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+")
        .expect("Invalid weekday regex")
});

static SEPTEMBER_ABBREVIATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsept\b").expect("Invalid month abbreviation regex"));

/// Ordered-pattern date parser.
///
/// Yearless and day-only input is completed from the reference date, which
/// defaults to today in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParser {
    reference: NaiveDate,
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DateParser {
    pub fn new() -> Self {
        Self {
            reference: Local::now().date_naive(),
        }
    }

    pub fn with_reference_date(mut self, reference: NaiveDate) -> Self {
        self.reference = reference;
        self
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference
    }

    /// Parse free-text input. Returns `None` when no pattern matches.
    pub fn parse(&self, input: &str) -> Option<NaiveDate> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let cleaned = clean_input(trimmed);
        let parsed = try_parse_dated(&cleaned)
            .or_else(|| self.try_parse_yearless(&cleaned))
            .or_else(|| self.try_parse_day_of_month(&cleaned));

        if parsed.is_none() {
            tracing::debug!(input = %trimmed, "unrecognised date input");
        }
        parsed
    }

    fn try_parse_yearless(&self, value: &str) -> Option<NaiveDate> {
        let year = self.reference.year();
        YEARLESS_FORMATS.iter().find_map(|(format, separator)| {
            let completed = format!("{value}{separator}{year}");
            let pattern = format!("{format}{separator}%Y");
            NaiveDate::parse_from_str(&completed, &pattern).ok()
        })
    }

    /// A bare day number in the reference month.
    fn try_parse_day_of_month(&self, value: &str) -> Option<NaiveDate> {
        let day = value.parse::<u32>().ok().filter(|day| (1..=31).contains(day))?;
        NaiveDate::from_ymd_opt(self.reference.year(), self.reference.month(), day)
    }
}

fn clean_input(value: &str) -> String {
    let without_weekday = LEADING_WEEKDAY.replace(value, "");
    SEPTEMBER_ABBREVIATION
        .replace_all(&without_weekday, "Sep")
        .into_owned()
}

fn try_parse_dated(value: &str) -> Option<NaiveDate> {
    DATED_FORMATS.iter().find_map(|format| {
        let date = NaiveDate::parse_from_str(value, format).ok()?;
        if has_four_digit_year(date) {
            tracing::trace!(input = %value, format, "matched date pattern");
            Some(date)
        } else {
            None
        }
    })
}

/// Rejects two-digit years, which `%Y` would otherwise read literally.
fn has_four_digit_year(date: NaiveDate) -> bool {
    (1000..=9999).contains(&date.year())
}

/// Parse with a reference date of today.
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    DateParser::new().parse(input)
}

/// Format a date for storage (`YYYY-MM-DD`).
pub fn format_for_storage(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

/// Format a date for display (`MM-DD-YYYY`).
pub fn format_for_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Read a stored `YYYY-MM-DD` value back.
pub fn parse_storage_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), STORAGE_FORMAT).ok()
}

/// Outcome of committing text typed into a date field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateCommit {
    /// Parsed; carries the storage form.
    Accepted(String),
    /// Blank input; the field now holds no date.
    Cleared,
    /// Unparseable; the field keeps its previous value and the input should
    /// revert to `retained`.
    Rejected { retained: String },
}

/// A free-text date input holding its last valid value.
#[derive(Debug, Clone, Default)]
pub struct DateField {
    parser: DateParser,
    committed: Option<NaiveDate>,
}

impl DateField {
    pub fn new(parser: DateParser) -> Self {
        Self {
            parser,
            committed: None,
        }
    }

    /// Seed from a stored `YYYY-MM-DD` value. Unreadable values start empty.
    pub fn from_storage(parser: DateParser, stored: &str) -> Self {
        Self {
            parser,
            committed: parse_storage_date(stored),
        }
    }

    pub fn committed(&self) -> Option<NaiveDate> {
        self.committed
    }

    /// Storage form of the committed value, empty when there is none.
    pub fn storage_value(&self) -> String {
        self.committed.map(format_for_storage).unwrap_or_default()
    }

    /// Display form of the committed value, empty when there is none.
    pub fn display_text(&self) -> String {
        self.committed.map(format_for_display).unwrap_or_default()
    }

    pub fn commit(&mut self, text: &str) -> DateCommit {
        if text.trim().is_empty() {
            self.committed = None;
            return DateCommit::Cleared;
        }
        match self.parser.parse(text) {
            Some(date) => {
                self.committed = Some(date);
                DateCommit::Accepted(format_for_storage(date))
            }
            None => DateCommit::Rejected {
                retained: self.display_text(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn parser() -> DateParser {
        DateParser::new().with_reference_date(date(2024, 4, 15))
    }

    #[test]
    fn month_name_forms() {
        let parser = parser();
        for input in [
            "January 5, 2024",
            "Jan 5, 2024",
            "Jan. 5, 2024",
            "January 5 2024",
            "Friday, January 5, 2024",
            "Fri, January 5, 2024",
            "5 January 2024",
            "05-Jan-2024",
        ] {
            assert_eq!(parser.parse(input), Some(date(2024, 1, 5)), "{input}");
        }
    }

    #[test]
    fn weekday_prefix_is_not_checked() {
        let parser = parser();
        assert_eq!(parser.parse("Monday, January 5, 2024"), Some(date(2024, 1, 5)));
        assert_eq!(parser.parse("tuesday 5 January 2024"), Some(date(2024, 1, 5)));
        assert_eq!(parser.parse("Wednesday, March 3"), Some(date(2024, 3, 3)));
        assert_eq!(parser.parse("Monday"), None);
    }

    #[test]
    fn sept_is_read_as_september() {
        let parser = parser();
        assert_eq!(parser.parse("Sept 5, 2024"), Some(date(2024, 9, 5)));
        assert_eq!(parser.parse("Sept. 5, 2024"), Some(date(2024, 9, 5)));
        assert_eq!(parser.parse("5 Sept 2024"), Some(date(2024, 9, 5)));
        assert_eq!(parser.parse("September 5, 2024"), Some(date(2024, 9, 5)));
    }

    #[test]
    fn numeric_forms_prefer_us_order() {
        let parser = parser();
        assert_eq!(parser.parse("1/2/2024"), Some(date(2024, 1, 2)));
        assert_eq!(parser.parse("01-02-2024"), Some(date(2024, 1, 2)));
        assert_eq!(parser.parse("2024-01-02"), Some(date(2024, 1, 2)));
        assert_eq!(parser.parse("2024/01/02"), Some(date(2024, 1, 2)));
        assert_eq!(parser.parse("2024.01.02"), Some(date(2024, 1, 2)));
    }

    #[test]
    fn european_forms_apply_when_us_reading_is_invalid() {
        let parser = parser();
        assert_eq!(parser.parse("25/12/2024"), Some(date(2024, 12, 25)));
        assert_eq!(parser.parse("25-12-2024"), Some(date(2024, 12, 25)));
        assert_eq!(parser.parse("25.12.2024"), Some(date(2024, 12, 25)));
    }

    #[test]
    fn yearless_forms_use_reference_year() {
        let parser = parser();
        assert_eq!(parser.parse("March 3"), Some(date(2024, 3, 3)));
        assert_eq!(parser.parse("3/7"), Some(date(2024, 3, 7)));
        assert_eq!(parser.parse("3-7"), Some(date(2024, 3, 7)));
        assert_eq!(parser.parse("7 March"), Some(date(2024, 3, 7)));
    }

    #[test]
    fn bare_day_uses_reference_month() {
        let parser = parser();
        assert_eq!(parser.parse("9"), Some(date(2024, 4, 9)));
        assert_eq!(parser.parse("31"), None);
        assert_eq!(parser.parse("0"), None);
        assert_eq!(parser.parse("32"), None);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let parser = parser();
        assert_eq!(parser.parse("02/30/2024"), None);
        assert_eq!(parser.parse("1/2/24"), None);
        assert_eq!(parser.parse("soon"), None);
        assert_eq!(parser.parse("  "), None);
    }

    #[test]
    fn storage_and_display_forms() {
        let value = date(2024, 1, 5);
        assert_eq!(format_for_storage(value), "2024-01-05");
        assert_eq!(format_for_display(value), "01-05-2024");
        assert_eq!(parse_storage_date("2024-01-05"), Some(value));
        assert_eq!(parse_storage_date("01-05-2024"), None);
    }

    #[test]
    fn date_field_keeps_last_valid_value() {
        let mut field = DateField::new(parser());
        assert_eq!(
            field.commit("January 5, 2024"),
            DateCommit::Accepted("2024-01-05".to_string())
        );
        assert_eq!(
            field.commit("not a date"),
            DateCommit::Rejected {
                retained: "01-05-2024".to_string()
            }
        );
        assert_eq!(field.storage_value(), "2024-01-05");
        assert_eq!(field.commit(""), DateCommit::Cleared);
        assert_eq!(field.committed(), None);
    }
}
