//! CSV export of a normalized series.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::Result;
use crate::series::NormalizedSeries;
use crate::types::{EXPORT_TIMESTAMP_FORMAT, TIMESTAMP_COLUMN};

/// Formats a cell value for export.
///
/// Integers keep a trailing `.0`, missing and NaN values are written as empty
/// cells, infinities as `inf` / `-inf`.
#[must_use]
pub fn format_value(value: Option<f64>) -> String {
    match value {
        None => String::new(),
        Some(v) if v.is_nan() => String::new(),
        Some(v) if v.is_infinite() => {
            if v > 0.0 { "inf".to_string() } else { "-inf".to_string() }
        }
        Some(v) => format!("{v:?}"),
    }
}

/// Writes `series` as CSV: a `Timestamp` column followed by every column in
/// series order.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write>(series: &NormalizedSeries, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec![TIMESTAMP_COLUMN];
    header.extend(series.column_names());
    csv.write_record(&header)?;

    let columns: Vec<_> = series.columns().collect();
    for (row, timestamp) in series.timestamps().iter().enumerate() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(timestamp.format(EXPORT_TIMESTAMP_FORMAT).to_string());
        record.extend(columns.iter().map(|c| format_value(c.data.get(row))));
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes `series` to the file at `path`, replacing any existing file.
///
/// Rows go to a temporary file next to `path` that is renamed into place once
/// complete, so a failed export never leaves a partial file behind.
///
/// # Errors
///
/// Returns an error if the file cannot be created, written or moved into place.
pub fn write_csv_path(series: &NormalizedSeries, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    write_csv(series, staged.as_file_mut())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    info!(path = %path.display(), rows = series.len(), "wrote processed export");
    Ok(())
}
