//! CSV ingestion: header validation, timestamp combination, value parsing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, SeriesError};
use crate::series::NormalizedSeries;
use crate::types::{Channel, DATE_COLUMN, TIME_COLUMN, TIMESTAMP_FORMAT, required_columns};

/// Default bound on the size of one export, 256 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 256 * 1024 * 1024;

/// Options controlling normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Stable-sort rows by timestamp; ties keep their original order.
    pub sort_by_time: bool,
    /// Reject inputs larger than this many bytes.
    pub max_input_bytes: u64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            sort_by_time: false,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// Positions of the required fields within a record.
struct HeaderLayout {
    date: usize,
    time: usize,
    /// Field position for each channel, indexed by [`Channel::index`].
    channels: [usize; Channel::COUNT],
    /// Channels sorted by their position in the header.
    channel_order: Vec<Channel>,
}

impl HeaderLayout {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let names: Vec<&str> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| if i == 0 { h.trim_start_matches('\u{feff}') } else { h })
            .collect();
        let position = |wanted: &str| names.iter().position(|h| *h == wanted);

        let missing: Vec<String> = required_columns()
            .into_iter()
            .filter(|c| position(*c).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(SeriesError::MissingColumns { columns: missing });
        }

        let mut channels = [0; Channel::COUNT];
        for channel in Channel::ALL {
            channels[channel.index()] = position(channel.header()).unwrap_or_default();
        }
        let mut channel_order = Channel::ALL.to_vec();
        channel_order.sort_by_key(|c| channels[c.index()]);

        Ok(Self {
            date: position(DATE_COLUMN).unwrap_or_default(),
            time: position(TIME_COLUMN).unwrap_or_default(),
            channels,
            channel_order,
        })
    }
}

/// Reads rig sensor exports into a [`NormalizedSeries`].
#[derive(Debug, Clone, Default)]
pub struct SeriesReader {
    options: NormalizeOptions,
}

impl SeriesReader {
    /// Creates a reader with the given options.
    #[must_use]
    pub const fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Reads and normalizes the export at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is larger than the
    /// configured bound, or fails normalization.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<NormalizedSeries> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        if size > self.options.max_input_bytes {
            return Err(SeriesError::InputTooLarge {
                limit: self.options.max_input_bytes,
            });
        }
        debug!(path = %path.display(), bytes = size, "reading sensor export");
        self.read(File::open(path)?)
    }

    /// Reads and normalizes an export from any byte source.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is larger than the configured bound, a
    /// required column is missing, any row has a missing or non-numeric
    /// value, or a timestamp does not parse.
    pub fn read<R: Read>(&self, reader: R) -> Result<NormalizedSeries> {
        let limit = self.options.max_input_bytes;
        let mut buf = Vec::new();
        reader.take(limit.saturating_add(1)).read_to_end(&mut buf)?;
        if buf.len() as u64 > limit {
            return Err(SeriesError::InputTooLarge { limit });
        }
        self.parse(&buf)
    }

    fn parse(&self, bytes: &[u8]) -> Result<NormalizedSeries> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let layout = HeaderLayout::resolve(csv.headers()?)?;

        let mut rows = Vec::new();
        let mut record = StringRecord::new();
        while csv.read_record(&mut record)? {
            let row = rows.len() + 1;
            rows.push(parse_row(&record, &layout, row)?);
        }

        if self.options.sort_by_time {
            // Vec::sort_by_key is stable, so equal timestamps keep row order.
            rows.sort_by_key(|(timestamp, _)| *timestamp);
        }

        let series = NormalizedSeries::from_rows(layout.channel_order, rows);
        if !series.is_monotonic() {
            warn!(
                rows = series.len(),
                "timestamps are not in chronological order; windowed rules assume they are"
            );
        }
        info!(rows = series.len(), columns = series.column_count(), "normalized sensor export");
        Ok(series)
    }
}

fn field<'r>(record: &'r StringRecord, index: usize, column: &str, row: usize) -> Result<&'r str> {
    match record.get(index).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SeriesError::MissingValue {
            row,
            column: column.to_string(),
        }),
    }
}

fn parse_row(
    record: &StringRecord,
    layout: &HeaderLayout,
    row: usize,
) -> Result<(NaiveDateTime, [f64; Channel::COUNT])> {
    let date = field(record, layout.date, DATE_COLUMN, row)?;
    let time = field(record, layout.time, TIME_COLUMN, row)?;
    let combined = format!("{date} {time}");
    let timestamp = NaiveDateTime::parse_from_str(&combined, TIMESTAMP_FORMAT)
        .map_err(|_| SeriesError::TimestampParse { row, value: combined.clone() })?;

    let mut values = [0.0; Channel::COUNT];
    for channel in Channel::ALL {
        let raw = field(record, layout.channels[channel.index()], channel.header(), row)?;
        let invalid = || SeriesError::InvalidNumber {
            row,
            column: channel.header().to_string(),
            value: raw.to_string(),
        };
        let value: f64 = raw.parse().map_err(|_| invalid())?;
        // `f64::from_str` accepts "NaN" and "inf"; source channels hold real readings only.
        if value.is_nan() {
            return Err(SeriesError::MissingValue {
                row,
                column: channel.header().to_string(),
            });
        }
        if value.is_infinite() {
            return Err(invalid());
        }
        values[channel.index()] = value;
    }
    Ok((timestamp, values))
}

/// Normalizes an export held in memory with default options.
///
/// # Errors
///
/// See [`SeriesReader::read`].
pub fn normalize_str(text: &str) -> Result<NormalizedSeries> {
    SeriesReader::default().read(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use test_case::test_case;

    const HEADER: &str = "YYYY/MM/DD,HH:MM:SS,Rate Of Penetration (ft_per_hr),PLC ROP (ft_per_hr),\
Hook Load (klbs),Standpipe Pressure (psi),Pump 1 strokes/min (SPM),Pump 2 strokes/min (SPM),\
DAS Vibe Lateral Max (g_force),DAS Vibe Axial Max (g_force),AutoDriller Limiting (unitless),\
DAS Vibe WOB Reduce (percent),DAS Vibe RPM Reduce (percent)";

    fn row(date: &str, time: &str, rop: f64, hook: f64) -> String {
        format!("{date},{time},{rop},{rop},{hook},2500,90,90,5,2,0,0,0")
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .expect("valid timestamp")
    }

    #[test]
    fn parses_rows_and_builds_index() {
        let text = format!(
            "{HEADER}\n{}\n{}\n",
            row("01/15/2024", "10:00:00", 50.0, 30.0),
            row("01/15/2024", "10:01:00", 55.5, 31.0)
        );
        let series = normalize_str(&text).expect("normalize");

        assert_eq!(series.len(), 2);
        assert_eq!(series.timestamps(), &[at(10, 0, 0), at(10, 1, 0)]);
        assert_eq!(series.channel(Channel::RateOfPenetration), &[50.0, 55.5]);
        assert_eq!(series.channel(Channel::HookLoad), &[30.0, 31.0]);
        assert!(series.column("YYYY/MM/DD").is_none());
        assert!(series.column("HH:MM:SS").is_none());
    }

    #[test]
    fn extra_columns_are_ignored_and_order_is_kept() {
        let text = "Comment,HH:MM:SS,Hook Load (klbs),YYYY/MM/DD,Rate Of Penetration (ft_per_hr),\
PLC ROP (ft_per_hr),Standpipe Pressure (psi),Pump 1 strokes/min (SPM),Pump 2 strokes/min (SPM),\
DAS Vibe Lateral Max (g_force),DAS Vibe Axial Max (g_force),AutoDriller Limiting (unitless),\
DAS Vibe WOB Reduce (percent),DAS Vibe RPM Reduce (percent)\n\
hello,10:00:00,42,01/15/2024,12,12,2500,90,90,5,2,0,0,0\n";
        let series = normalize_str(text).expect("normalize");

        assert_eq!(series.column_count(), Channel::COUNT);
        assert_eq!(series.column_names()[0], "Hook Load (klbs)");
        assert_eq!(series.channel(Channel::HookLoad), &[42.0]);
        assert!(series.column("Comment").is_none());
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let header = HEADER
            .replace(",Hook Load (klbs)", "")
            .replace(",DAS Vibe RPM Reduce (percent)", "");
        let err = normalize_str(&format!("{header}\n")).unwrap_err();
        match err {
            SeriesError::MissingColumns { columns } => {
                assert_eq!(
                    columns,
                    vec!["Hook Load (klbs)", "DAS Vibe RPM Reduce (percent)"]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_names_are_case_sensitive() {
        let header = HEADER.replace("Hook Load (klbs)", "hook load (klbs)");
        let err = normalize_str(&format!("{header}\n")).unwrap_err();
        assert!(matches!(err, SeriesError::MissingColumns { .. }));
    }

    #[test]
    fn bad_timestamp_is_fatal() {
        let text = format!(
            "{HEADER}\n{}\n{}\n",
            row("01/15/2024", "10:00:00", 50.0, 30.0),
            row("2024-01-15", "10:01:00", 50.0, 30.0)
        );
        let err = normalize_str(&text).unwrap_err();
        assert!(matches!(err, SeriesError::TimestampParse { row: 2, .. }));
    }

    #[test]
    fn empty_value_is_fatal() {
        let text = format!(
            "{HEADER}\n01/15/2024,10:00:00,50,50,,2500,90,90,5,2,0,0,0\n"
        );
        let err = normalize_str(&text).unwrap_err();
        match err {
            SeriesError::MissingValue { row, column } => {
                assert_eq!(row, 1);
                assert_eq!(column, "Hook Load (klbs)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_row_is_fatal() {
        let text = format!("{HEADER}\n01/15/2024,10:00:00,50\n");
        let err = normalize_str(&text).unwrap_err();
        assert!(matches!(err, SeriesError::MissingValue { row: 1, .. }));
    }

    #[test]
    fn non_numeric_value_is_fatal() {
        let text = format!(
            "{HEADER}\n01/15/2024,10:00:00,fast,50,30,2500,90,90,5,2,0,0,0\n"
        );
        let err = normalize_str(&text).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidNumber { row: 1, .. }));
    }

    #[test_case("NaN", true ; "nan capitalized")]
    #[test_case("nan", true ; "nan lowercase")]
    #[test_case("inf", false ; "positive infinity")]
    #[test_case("-inf", false ; "negative infinity")]
    #[test_case("infinity", false ; "spelled infinity")]
    fn non_finite_value_is_fatal(token: &str, missing: bool) {
        let text = format!(
            "{HEADER}\n01/15/2024,10:00:00,50,50,{token},2500,90,90,5,2,0,0,0\n"
        );
        match normalize_str(&text) {
            Err(SeriesError::MissingValue { row, column }) if missing => {
                assert_eq!(row, 1);
                assert_eq!(column, Channel::HookLoad.header());
            }
            Err(SeriesError::InvalidNumber { row, column, value }) if !missing => {
                assert_eq!(row, 1);
                assert_eq!(column, Channel::HookLoad.header());
                assert_eq!(value, token);
            }
            other => panic!("unexpected result for {token}: {other:?}"),
        }
    }

    #[test]
    fn header_only_yields_empty_series() {
        let series = normalize_str(&format!("{HEADER}\n")).expect("normalize");
        assert!(series.is_empty());
        assert_eq!(series.column_count(), Channel::COUNT);
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let text = format!("\u{feff}{HEADER}\n{}\n", row("01/15/2024", "10:00:00", 1.0, 1.0));
        let series = normalize_str(&text).expect("normalize");
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn input_size_is_bounded() {
        let reader = SeriesReader::new(NormalizeOptions {
            max_input_bytes: 16,
            ..NormalizeOptions::default()
        });
        let err = reader.read(HEADER.as_bytes()).unwrap_err();
        assert!(matches!(err, SeriesError::InputTooLarge { limit: 16 }));
    }

    #[test]
    fn rows_keep_file_order_by_default() {
        let text = format!(
            "{HEADER}\n{}\n{}\n",
            row("01/15/2024", "10:05:00", 1.0, 1.0),
            row("01/15/2024", "10:00:00", 2.0, 2.0)
        );
        let series = normalize_str(&text).expect("normalize");
        assert_eq!(series.timestamps(), &[at(10, 5, 0), at(10, 0, 0)]);
        assert!(!series.is_monotonic());
    }

    #[test]
    fn sort_by_time_is_stable() {
        let text = format!(
            "{HEADER}\n{}\n{}\n{}\n",
            row("01/15/2024", "10:05:00", 1.0, 1.0),
            row("01/15/2024", "10:00:00", 2.0, 2.0),
            row("01/15/2024", "10:00:00", 3.0, 3.0)
        );
        let reader = SeriesReader::new(NormalizeOptions {
            sort_by_time: true,
            ..NormalizeOptions::default()
        });
        let series = reader.read(text.as_bytes()).expect("normalize");
        assert_eq!(series.timestamps(), &[at(10, 0, 0), at(10, 0, 0), at(10, 5, 0)]);
        assert_eq!(series.channel(Channel::RateOfPenetration), &[2.0, 3.0, 1.0]);
    }

    #[test]
    fn read_path_reads_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("export.csv");
        std::fs::write(
            &path,
            format!("{HEADER}\n{}\n", row("01/15/2024", "10:00:00", 1.0, 1.0)),
        )
        .expect("write");
        let series = SeriesReader::default().read_path(&path).expect("normalize");
        assert_eq!(series.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_row_count_and_columns_preserved(
            values in proptest::collection::vec((0.0f64..500.0, 0.0f64..200.0), 0..60)
        ) {
            let mut text = format!("{HEADER}\n");
            for (i, (rop, hook)) in values.iter().enumerate() {
                let minute = i % 60;
                text.push_str(&row("01/15/2024", &format!("10:{minute:02}:00"), *rop, *hook));
                text.push('\n');
            }
            let series = normalize_str(&text).expect("normalize");
            prop_assert_eq!(series.len(), values.len());
            prop_assert_eq!(series.column_count(), Channel::COUNT);
            for channel in Channel::ALL {
                prop_assert!(series.column(channel.header()).is_some());
            }
        }
    }
}
