//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "refx",
    version,
    about = "Reference library exporter and export validator",
    long_about = "Export a reference library to the external import XML schema,\n\
                  and diff two exports field-by-field to detect regressions."
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
    /// Export a library to the import XML schema.
    Export(ExportArgs),

    /// Diff two export documents field-by-field.
    Compare(CompareArgs),
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Path to the library file (.enl) to export.
    #[arg(value_name = "LIBRARY")]
    pub library: PathBuf,

    /// Output document path (default: next to the library file).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Audit sidecar path (default: next to the output document).
    #[arg(long = "audit", value_name = "PATH")]
    pub audit: Option<PathBuf>,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// The reference export document.
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// The candidate export document to validate.
    #[arg(value_name = "CANDIDATE")]
    pub candidate: PathBuf,

    /// Also write the comparison result as JSON.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,
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
