//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rig_series::{DEFAULT_EXPORT_FILE, DEFAULT_MAX_INPUT_BYTES};

/// Default number of rows shown in the preview table.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// rigwatch - drilling sensor analysis and operational alerts.
#[derive(Parser, Debug, Clone)]
#[command(name = "rigwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, env = "RIGWATCH_FORMAT", default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[derive(Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Analyze a drilling sensor export.
    Analyze(AnalyzeArgs),

    /// List the alert rules and their thresholds.
    Rules,
}

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// CSV export to analyze.
    #[arg(required = true)]
    pub file: PathBuf,

    /// Where to write the processed table.
    #[arg(short, long, env = "RIGWATCH_OUTPUT", default_value = DEFAULT_EXPORT_FILE)]
    pub output: PathBuf,

    /// Skip writing the processed table.
    #[arg(long)]
    pub no_export: bool,

    /// Number of rows in the preview table.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,

    /// Add the shaker and screen overlay metrics.
    #[arg(long)]
    pub overlay: bool,

    /// Sort rows by timestamp before evaluating rules.
    #[arg(long)]
    pub sort: bool,

    /// Reject inputs larger than this many bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    pub max_input_bytes: u64,
}

impl AnalyzeArgs {
    /// The export destination, or `None` when exporting is disabled.
    #[must_use]
    pub fn export_path(&self) -> Option<PathBuf> {
        (!self.no_export).then(|| self.output.clone())
    }
}
