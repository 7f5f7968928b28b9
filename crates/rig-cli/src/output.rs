//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Number of cells in a trend sparkline.
pub const SPARKLINE_WIDTH: usize = 40;

const SPARK_TICKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Renders `values` as a block-character sparkline at most `width` cells wide.
///
/// Longer inputs are averaged into `width` buckets. Missing and non-finite
/// values leave a blank cell. A flat line renders at the lowest tick.
#[must_use]
pub fn sparkline(values: &[Option<f64>], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let cells: Vec<Option<f64>> = if values.len() <= width {
        values.iter().map(|v| v.filter(|x| x.is_finite())).collect()
    } else {
        (0..width)
            .map(|bucket| {
                let start = bucket * values.len() / width;
                let end = (bucket + 1) * values.len() / width;
                bucket_mean(&values[start..end])
            })
            .collect()
    };

    let Some((low, high)) = cells.iter().flatten().fold(None, |range, v| match range {
        None => Some((*v, *v)),
        Some((low, high)) => Some((f64::min(low, *v), f64::max(high, *v))),
    }) else {
        return " ".repeat(cells.len());
    };

    let span = high - low;
    let top = (SPARK_TICKS.len() - 1) as f64;
    cells
        .iter()
        .map(|cell| match cell {
            None => ' ',
            Some(_) if span <= 0.0 => SPARK_TICKS[0],
            Some(v) => {
                let tick = (((v - low) / span) * top).round() as usize;
                SPARK_TICKS[tick.min(SPARK_TICKS.len() - 1)]
            }
        })
        .collect()
}

fn bucket_mean(values: &[Option<f64>]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().flatten().copied().filter(|v| v.is_finite()).collect();
    (!finite.is_empty()).then(|| finite.iter().sum::<f64>() / finite.len() as f64)
}

/// Formats a numeric cell with two decimals; missing values print as `-`.
#[must_use]
pub fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_nan() => "-".to_string(),
        Some(v) if v.is_infinite() => (if v > 0.0 { "inf" } else { "-inf" }).to_string(),
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

/// Shortens `s` to at most `max_len` characters, marking the cut with `...`.
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
