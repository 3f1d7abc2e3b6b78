use std::borrow::Cow;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use trial_filter::FieldOption;
use trial_model::{ComparisonMode, FieldSelector, FieldValue, FilterDimension, TrialRecord};
use trial_normalization::{
    format_for_display, format_for_storage, format_value, line_of_therapy_label, phase_label,
};

use crate::types::{DateResult, FilterResult, OptionsResult};

pub fn print_options(result: &OptionsResult) {
    println!("Field: {}", result.selector);
    println!(
        "{} option(s) across {} trial(s)",
        result.options.len(),
        result.record_count
    );
    println!("{}", options_table(result.selector, &result.options));
}

pub fn print_filter_summary(result: &FilterResult) {
    let dimensions: Vec<&str> = result
        .active_dimensions
        .iter()
        .map(|dimension| dimension.name())
        .collect();
    if dimensions.is_empty() {
        println!("Filters: none");
    } else {
        println!("Filters: {}", dimensions.join(", "));
    }
    println!("Criteria: {}", result.criteria_count);
    println!("{}", trials_table(&result.trials));
    println!("{} of {} trial(s) matched", result.matched(), result.total);
}

pub fn print_date(result: &DateResult) {
    match result.date {
        Some(date) => {
            println!("Storage: {}", format_for_storage(date));
            println!("Display: {}", format_for_display(date));
        }
        None => {
            eprintln!(
                "Could not parse '{}' (reference date {})",
                result.input,
                format_for_storage(result.reference)
            );
        }
    }
}

pub fn print_fields() {
    println!("{}", fields_table());
}

/// Display label for an option of `selector`.
pub fn option_label(selector: FieldSelector, value: &str) -> String {
    match selector {
        FieldSelector::TrialPhase => phase_label(value),
        FieldSelector::LineOfTherapy => line_of_therapy_label(value),
        _ => format_value(Some(value)),
    }
}

pub fn options_table(selector: FieldSelector, options: &[FieldOption]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Value"), header_cell("Label")]);
    apply_table_style(&mut table);
    for option in options {
        table.add_row(vec![
            Cell::new(&option.value),
            Cell::new(option_label(selector, &option.label)),
        ]);
    }
    if options.is_empty() {
        table.add_row(vec![dim_cell("-"), dim_cell("no values")]);
    }
    table
}

pub fn trials_table(trials: &[TrialRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Trial"),
        header_cell("Therapeutic Area"),
        header_cell("Phase"),
        header_cell("Status"),
        header_cell("Line of Therapy"),
    ]);
    apply_table_style(&mut table);
    for trial in trials {
        let text = |selector: FieldSelector| {
            trial
                .resolve(&selector.field_path())
                .and_then(FieldValue::as_text)
                .map(Cow::into_owned)
        };
        table.add_row(vec![
            id_cell(trial.display_id()),
            Cell::new(format_value(text(FieldSelector::TherapeuticArea).as_deref())),
            match text(FieldSelector::TrialPhase) {
                Some(phase) => Cell::new(phase_label(&phase)),
                None => dim_cell("N/A"),
            },
            Cell::new(format_value(text(FieldSelector::Status).as_deref())),
            match text(FieldSelector::LineOfTherapy) {
                Some(line) => Cell::new(line_of_therapy_label(&line)),
                None => dim_cell("N/A"),
            },
        ]);
    }
    table
}

pub fn fields_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Selector"),
        header_cell("Dimension"),
        header_cell("Comparison"),
        header_cell("Multi-value"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Center);
    }
    for selector in FieldSelector::all() {
        let dimension = FilterDimension::ALL
            .into_iter()
            .find(|dimension| dimension.binding().selector == selector);
        let row = match dimension {
            Some(dimension) => {
                let binding = dimension.binding();
                vec![
                    Cell::new(selector.path()),
                    Cell::new(dimension.name())
                        .fg(Color::Blue)
                        .add_attribute(Attribute::Bold),
                    Cell::new(comparison_name(binding.comparison)),
                    Cell::new(if binding.list_valued { "yes" } else { "no" }),
                ]
            }
            None => vec![
                Cell::new(selector.path()),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ],
        };
        table.add_row(row);
    }
    table
}

fn comparison_name(mode: ComparisonMode) -> &'static str {
    match mode {
        ComparisonMode::Generic => "normalized text",
        ComparisonMode::Phase => "phase synonyms",
        ComparisonMode::LineOfTherapy => "line-of-therapy synonyms",
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn id_cell(id: Option<String>) -> Cell {
    match id {
        Some(id) => Cell::new(id).add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
