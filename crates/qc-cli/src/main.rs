//! Garment measurement QC CLI.

use clap::{ColorChoice, Parser};
use qc_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_batch, run_chart, run_sizes, run_standards, run_validate};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Validate(args) => match run_validate(args) {
            Ok(result) => {
                if result.passed() { 0 } else { 1 }
            }
            Err(error) => report_error(&error),
        },
        Command::Batch(args) => match run_batch(args) {
            Ok(summary) => {
                if summary.total.failed == 0 { 0 } else { 1 }
            }
            Err(error) => report_error(&error),
        },
        Command::Sizes(args) => match run_sizes(args) {
            Ok(()) => 0,
            Err(error) => report_error(&error),
        },
        Command::Chart(args) => match run_chart(args) {
            Ok(true) => 0,
            Ok(false) => 1,
            Err(error) => report_error(&error),
        },
        Command::Standards(args) => match run_standards(args) {
            Ok(()) => 0,
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
///
/// `--log-level` beats `-v/-q`; with neither, `RUST_LOG` may take over.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit_level = match cli.log_level {
        Some(level) => Some(match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }),
        None if cli.verbosity.is_present() => Some(cli.verbosity.tracing_level_filter()),
        None => None,
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    let config = LogConfig::default()
        .with_format(format)
        .with_ansi(with_ansi)
        .with_log_file(cli.log_file.clone());
    match explicit_level {
        Some(level) => config.with_level(level),
        None => config,
    }
}
