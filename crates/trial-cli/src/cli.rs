//! CLI argument definitions for the trial console.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use trial_normalization::parse_storage_date;

#[derive(Parser)]
#[command(
    name = "trial-console",
    version,
    about = "Trial console - inspect, filter and normalize clinical trial records",
    long_about = "Inspect clinical trial records exported as JSON.\n\n\
                  Lists dropdown options per field, applies saved filter state and\n\
                  search criteria, and normalizes typed dates."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the distinct dropdown options for a field.
    Options(OptionsArgs),

    /// List supported field selectors and filter dimensions.
    Fields,

    /// Print the trials that pass a filter state and search criteria.
    Filter(FilterArgs),

    /// Parse a typed date and print its storage and display forms.
    Date(DateArgs),
}

#[derive(Parser)]
pub struct OptionsArgs {
    /// JSON file with a trial array (or an object with a `trials` array).
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// Field selector path, e.g. `overview.trial_phase` or `criteria[0].sex`.
    #[arg(long = "field", value_name = "PATH")]
    pub field: String,

    /// Print options as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct FilterArgs {
    /// JSON file with a trial array (or an object with a `trials` array).
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// Saved filter state, keyed by dimension name.
    #[arg(long = "filters", value_name = "FILE")]
    pub filters: Option<PathBuf>,

    /// Saved search criteria list.
    #[arg(long = "criteria", value_name = "FILE")]
    pub criteria: Option<PathBuf>,

    /// Print matching trials as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct DateArgs {
    /// Date as typed, e.g. "January 5, 2024" or "3/7".
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Reference date (YYYY-MM-DD) for yearless and day-only input.
    ///
    /// Defaults to today.
    #[arg(long = "reference", value_name = "DATE", value_parser = parse_reference_date)]
    pub reference: Option<NaiveDate>,
}

fn parse_reference_date(value: &str) -> Result<NaiveDate, String> {
    parse_storage_date(value).ok_or_else(|| format!("expected YYYY-MM-DD, got '{value}'"))
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
