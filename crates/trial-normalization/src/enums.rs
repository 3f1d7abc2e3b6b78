//! Synonym tables for trial phase and line of therapy.
//!
//! Both vocabularies have canonical labels that do not follow the generic
//! Title-case rule, so they are resolved by table lookup. Each table also
//! contains its own labels as keys, which keeps the mappers idempotent.
//!
//! The two mappers differ on unknown input: the phase mapper returns it
//! unchanged while the line-of-therapy mapper falls back to [`format_value`].

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::formatter::{format_value, normalize_for_comparison};

/// Canonical phase labels.
pub const PHASE_LABELS: [&str; 9] = [
    "Pre-clinical",
    "Phase I",
    "Phase I/II",
    "Phase II",
    "Phase II/III",
    "Phase III",
    "Phase III/IV",
    "Phase IV",
    "Not Applicable",
];

/// Canonical line-of-therapy tokens and their ranked labels.
pub const LINE_OF_THERAPY_LABELS: [(&str, &str); 7] = [
    ("first_line", "1 - First Line"),
    ("second_line", "2 - Second Line"),
    ("third_line", "3 - Third Line"),
    ("fourth_line", "4 - Fourth Line"),
    ("at_least_first_line", "1+ - At least first line"),
    ("at_least_second_line", "2+ - At least second line"),
    ("at_least_third_line", "3+ - At least third line"),
];

/// Lower-cased spelling -> canonical phase label.
static PHASES: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    let mut add = |label: &'static str, spellings: &[&str]| {
        map.insert(label.to_lowercase(), label);
        for spelling in spellings {
            map.insert((*spelling).to_string(), label);
        }
    };

    add(
        "Pre-clinical",
        &["preclinical", "pre_clinical", "pre clinical", "phase 0", "phase_0"],
    );
    add("Phase I", &["phase 1", "phase_1", "phase1", "phase_i"]);
    add(
        "Phase I/II",
        &[
            "phase 1/2",
            "phase 1/phase 2",
            "phase 1-2",
            "phase_1_2",
            "phase1/2",
            "phase_i_ii",
            "phase i-ii",
        ],
    );
    add("Phase II", &["phase 2", "phase_2", "phase2", "phase_ii"]);
    add(
        "Phase II/III",
        &[
            "phase 2/3",
            "phase 2/phase 3",
            "phase 2-3",
            "phase_2_3",
            "phase2/3",
            "phase_ii_iii",
            "phase ii-iii",
        ],
    );
    add("Phase III", &["phase 3", "phase_3", "phase3", "phase_iii"]);
    add(
        "Phase III/IV",
        &[
            "phase 3/4",
            "phase 3-4",
            "phase_3_4",
            "phase3/4",
            "phase_iii_iv",
            "phase iii-iv",
        ],
    );
    add("Phase IV", &["phase 4", "phase_4", "phase4", "phase_iv"]);
    add("Not Applicable", &["not_applicable", "n/a", "na", "not applicable"]);

    map
});

/// Normalized line-of-therapy key -> ranked label.
static LINES_OF_THERAPY: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (token, label) in LINE_OF_THERAPY_LABELS {
        map.insert(token.to_string(), label);
        map.insert(line_of_therapy_key(label), label);
    }
    map
});

/// Map a phase spelling to its canonical label.
///
/// Input that is not in the table is returned unchanged.
pub fn phase_label(raw: &str) -> String {
    match PHASES.get(&raw.trim().to_lowercase()) {
        Some(label) => (*label).to_string(),
        None => raw.to_string(),
    }
}

/// Phase equivalence after mapping both sides (case-insensitive).
pub fn phases_equal(a: &str, b: &str) -> bool {
    phase_label(a).trim().to_lowercase() == phase_label(b).trim().to_lowercase()
}

/// Table key for a line-of-therapy value: lower-case words joined by `_`.
///
/// Underscores count as word separators, so `first  line` and `first__line`
/// both become `first_line`.
fn line_of_therapy_key(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Map a line-of-therapy value to its ranked label.
///
/// Input that is not in the table is formatted with [`format_value`].
pub fn line_of_therapy_label(raw: &str) -> String {
    match LINES_OF_THERAPY.get(&line_of_therapy_key(raw)) {
        Some(label) => (*label).to_string(),
        None => format_value(Some(raw)),
    }
}

/// Line-of-therapy equivalence after mapping both sides.
pub fn line_of_therapy_equal(a: &str, b: &str) -> bool {
    normalize_for_comparison(&line_of_therapy_label(a))
        == normalize_for_comparison(&line_of_therapy_label(b))
}
