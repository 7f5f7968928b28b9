//! CLI error types.

use rig_alerts::AlertError;
use rig_series::SeriesError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading, normalizing or exporting the series failed.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// The alert configuration was rejected.
    #[error(transparent)]
    Alerts(#[from] AlertError),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
