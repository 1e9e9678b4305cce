//! CLI argument definitions for garment measurement QC.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "garment-qc",
    version,
    about = "Garment measurement QC - check measured garments against a size chart",
    long_about = "Check measurement files produced at the inspection station against the\n\
                  reference size chart.\n\n\
                  Each measurement must lie within its tolerance of the chart value for the\n\
                  declared size; a single failing measurement fails the garment."
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
    /// Validate one measurement file against the chart for a size.
    Validate(ValidateArgs),

    /// Validate every measurement file in a directory.
    Batch(BatchArgs),

    /// List the sizes known to the reference chart.
    Sizes(StandardsArgs),

    /// Print the standard measurements for one size.
    Chart(ChartArgs),

    /// Show which reference data is in force.
    Standards(StandardsArgs),
}

/// Reference data overrides shared by every subcommand.
#[derive(Args, Clone, Default)]
pub struct StandardsArgs {
    /// Size chart CSV to use instead of the built-in sweatshirt chart.
    ///
    /// Falls back to `GARMENT_QC_CHART` when not given.
    #[arg(long = "chart", value_name = "CSV")]
    pub chart: Option<PathBuf>,

    /// Tolerance policy TOML to use instead of the built-in defaults.
    ///
    /// Falls back to `GARMENT_QC_TOLERANCES` when not given.
    #[arg(long = "tolerances", value_name = "TOML")]
    pub tolerances: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Measurement file (.txt) produced by the measuring station.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Declared garment size, e.g. "8/9".
    #[arg(long = "size", value_name = "SIZE")]
    pub size: String,

    /// Operator who took the measurements.
    #[arg(long = "operator", value_name = "ID")]
    pub operator: Option<String>,

    /// Session identifier (a random one is generated when omitted).
    #[arg(long = "session", value_name = "ID")]
    pub session: Option<String>,

    /// How to print the result.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Write the result to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub standards: StandardsArgs,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// Directory containing measurement files (.txt). Not searched recursively.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Declared size shared by every file in the directory.
    #[arg(long = "size", value_name = "SIZE")]
    pub size: String,

    /// Operator who took the measurements.
    #[arg(long = "operator", value_name = "ID")]
    pub operator: Option<String>,

    /// Also write the per-size summary as CSV.
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    #[command(flatten)]
    pub standards: StandardsArgs,
}

#[derive(Parser)]
pub struct ChartArgs {
    /// Size label, e.g. "11/12".
    #[arg(value_name = "SIZE")]
    pub size: String,

    #[command(flatten)]
    pub standards: StandardsArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
    Csv,
    Text,
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
