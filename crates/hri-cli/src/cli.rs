//! CLI argument definitions for the HR insight tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "hr-insight",
    version,
    about = "HR Insight - analyze arbitrary employee spreadsheets",
    long_about = "Analyze an arbitrary spreadsheet or CSV of employee records.\n\n\
                  Columns are matched to known HR concepts (name, salary,\n\
                  department, ...) by a heuristic mapper; analysis degrades\n\
                  gracefully when expected columns are absent."
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
    /// Analyze one tabular file and print the result summary.
    Analyze(AnalyzeArgs),

    /// List the semantic field catalog.
    Fields,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the CSV or workbook file to analyze.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the plain-text report to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Write the coerced table as CSV (UTF-8 with byte-order mark).
    #[arg(long = "export-csv", value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Write the analysis bundle as JSON.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Load a saved mapping configuration and overlay it on the detected
    /// mapping (saved assignments win).
    #[arg(long = "mapping-config", value_name = "PATH")]
    pub mapping_config: Option<PathBuf>,

    /// Save the resolved mapping configuration after the run.
    #[arg(long = "save-config", value_name = "PATH")]
    pub save_config: Option<PathBuf>,

    /// Include chart availability in the summary output.
    #[arg(long = "charts")]
    pub charts: bool,
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
