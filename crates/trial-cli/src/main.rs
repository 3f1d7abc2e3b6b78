//! Trial console CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;
use trial_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use trial_cli::commands::{run_date, run_filter, run_options};
use trial_cli::logging::{LogConfig, LogFormat, init_logging};
use trial_cli::summary::{print_date, print_fields, print_filter_summary, print_options};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Options(args) => match run_options(&args) {
            Ok(result) if args.json => print_json(&result.options),
            Ok(result) => {
                print_options(&result);
                0
            }
            Err(error) => report(&error),
        },
        Command::Fields => {
            print_fields();
            0
        }
        Command::Filter(args) => match run_filter(&args) {
            Ok(result) if args.json => print_json(&result.trials),
            Ok(result) => {
                print_filter_summary(&result);
                0
            }
            Err(error) => report(&error),
        },
        Command::Date(args) => {
            let result = run_date(&args);
            print_date(&result);
            if result.date.is_some() { 0 } else { 1 }
        }
    };
    std::process::exit(exit_code);
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(error) => {
            eprintln!("error: {error}");
            1
        }
    }
}

fn report(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
