//! Error types for the rig-series crate.

use thiserror::Error;

/// Errors that can occur while normalizing a sensor export.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// One or more required columns are absent from the header row.
    #[error("missing required column(s): {}", columns.join(", "))]
    MissingColumns {
        /// The required column names that were not found.
        columns: Vec<String>,
    },

    /// A required field is empty or absent in a data row.
    #[error("row {row}: missing value for column '{column}'")]
    MissingValue {
        /// 1-based data row number.
        row: usize,
        /// The column with no value.
        column: String,
    },

    /// A channel value could not be parsed as a number.
    #[error("row {row}: invalid number '{value}' in column '{column}'")]
    InvalidNumber {
        /// 1-based data row number.
        row: usize,
        /// The column holding the value.
        column: String,
        /// The raw text that failed to parse.
        value: String,
    },

    /// The combined date and time fields do not match `%m/%d/%Y %H:%M:%S`.
    #[error("row {row}: cannot parse timestamp '{value}' (expected MM/DD/YYYY HH:MM:SS)")]
    TimestampParse {
        /// 1-based data row number.
        row: usize,
        /// The combined date/time text.
        value: String,
    },

    /// The input exceeds the configured size bound.
    #[error("input exceeds the {limit} byte limit")]
    InputTooLarge {
        /// The configured limit in bytes.
        limit: u64,
    },

    /// A derived column does not have one value per row.
    #[error("column '{name}' has {actual} values, expected {expected}")]
    LengthMismatch {
        /// The derived column name.
        name: String,
        /// Number of rows in the series.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// A derived column would shadow a source channel.
    #[error("column '{name}' is a source channel and cannot be replaced")]
    ReservedColumn {
        /// The conflicting column name.
        name: String,
    },

    /// Malformed CSV (bad quoting, invalid UTF-8, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure while reading or writing a file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for series operations.
pub type Result<T> = std::result::Result<T, SeriesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_missing_columns() {
        let err = SeriesError::MissingColumns {
            columns: vec!["Hook Load (klbs)".to_string(), "HH:MM:SS".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing required column(s): Hook Load (klbs), HH:MM:SS"
        );
    }

    #[test]
    fn error_display_timestamp_parse() {
        let err = SeriesError::TimestampParse {
            row: 3,
            value: "2024-01-01 00:00:00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "row 3: cannot parse timestamp '2024-01-01 00:00:00' (expected MM/DD/YYYY HH:MM:SS)"
        );
    }

    #[test]
    fn error_display_invalid_number() {
        let err = SeriesError::InvalidNumber {
            row: 7,
            column: "Hook Load (klbs)".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "row 7: invalid number 'abc' in column 'Hook Load (klbs)'"
        );
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SeriesError = io_err.into();
        assert!(matches!(err, SeriesError::Io(_)));
    }
}
