//! Display labels and comparison keys for free-text values.
//!
//! Two independent normal forms live here:
//! - [`format_value`] produces the label shown in the console
//!   (`breast_cancer` -> `Breast Cancer`).
//! - [`normalize_for_comparison`] produces the key used when two differently
//!   sourced spellings of the same value are compared.
//!
//! Neither is derivable from the other.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Label emitted for missing values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Upper-case key -> canonical spelling.
static ACRONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Receptor status
    for acronym in [
        "HER2", "HER2+", "HER2-", "HR", "HR+", "HR-", "ER", "ER+", "ER-", "PR", "PR+", "PR-",
        "TNBC",
    ] {
        map.insert(acronym, acronym);
    }

    map.insert("NOS", "NOS");
    map.insert("CNS", "CNS");
    map.insert("CRO", "CRO");
    map.insert("IO", "IO");
    map.insert("PGX", "PGx");

    map
});

static COMPARISON_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[_,/\-\u{2013}\u{2014}]").expect("Invalid comparison punctuation regex")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Returns the canonical spelling if `value` is a known acronym.
pub fn canonical_acronym(value: &str) -> Option<&'static str> {
    ACRONYMS.get(value.to_uppercase().as_str()).copied()
}

/// Format a raw value as a display label.
///
/// Missing, blank and `N/A` values all become `"N/A"`. Underscores are read
/// as spaces. Known acronyms get their canonical casing, other fully
/// upper-case words without digits are kept, and everything else is
/// Title-cased.
pub fn format_value(raw: Option<&str>) -> String {
    let Some(trimmed) = raw.map(str::trim) else {
        return NOT_AVAILABLE.to_string();
    };
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        return NOT_AVAILABLE.to_string();
    }

    let spaced = trimmed.replace('_', " ");
    let words: Vec<&str> = spaced.split_whitespace().collect();

    if let Some(acronym) = canonical_acronym(&words.join(" ")) {
        return acronym.to_string();
    }

    words
        .iter()
        .map(|word| format_word(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_word(word: &str) -> String {
    let upper = word.to_uppercase();
    if let Some(acronym) = canonical_acronym(word) {
        // Lower-case spellings such as `cns` are ordinary words.
        if word == upper || word == acronym {
            return acronym.to_string();
        }
    }
    if word.chars().count() >= 2 && word == upper && !word.chars().any(|c| c.is_ascii_digit()) {
        return word.to_string();
    }
    title_case(word)
}

/// Upper-cases the first character and lower-cases the rest.
///
/// Only the first character of an expanding upper-case mapping stays upper
/// (`ß` -> `Ss`, `ﬁ` -> `Fi`).
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    let mut titled = String::with_capacity(word.len());
    titled.extend(upper.next());
    titled.extend(upper.flat_map(char::to_lowercase));
    titled.extend(chars.flat_map(char::to_lowercase));
    titled
}

/// Comparison key: lower-case, punctuation and underscores as spaces,
/// whitespace collapsed.
pub fn normalize_for_comparison(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let spaced = COMPARISON_PUNCTUATION.replace_all(&lowered, " ");
    WHITESPACE_RUN.replace_all(spaced.trim(), " ").into_owned()
}

/// True when two values share a comparison key.
pub fn values_equivalent(a: &str, b: &str) -> bool {
    normalize_for_comparison(a) == normalize_for_comparison(b)
}
