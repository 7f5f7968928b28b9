//! Drilling sensor export ingestion for rigwatch.
//!
//! `rig-series` turns a rig sensor CSV export into a [`NormalizedSeries`]: a
//! table indexed by a single combined timestamp, with the date and time source
//! columns consumed and one numeric column per channel.
//!
//! # Example
//!
//! ```rust
//! use rig_series::{Channel, normalize_str};
//!
//! let csv = "YYYY/MM/DD,HH:MM:SS,Rate Of Penetration (ft_per_hr),PLC ROP (ft_per_hr),\
//! Hook Load (klbs),Standpipe Pressure (psi),Pump 1 strokes/min (SPM),Pump 2 strokes/min (SPM),\
//! DAS Vibe Lateral Max (g_force),DAS Vibe Axial Max (g_force),AutoDriller Limiting (unitless),\
//! DAS Vibe WOB Reduce (percent),DAS Vibe RPM Reduce (percent)\n\
//! 01/15/2024,10:00:00,45.2,45.0,38.1,2650,92,90,4.1,1.9,0,0,0\n";
//!
//! let series = normalize_str(csv).unwrap();
//! assert_eq!(series.len(), 1);
//! assert_eq!(series.channel(Channel::HookLoad), &[38.1]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod export;
pub mod reader;
pub mod series;
pub mod types;

pub use error::{Result, SeriesError};
pub use export::{format_value, write_csv, write_csv_path};
pub use reader::{DEFAULT_MAX_INPUT_BYTES, NormalizeOptions, SeriesReader, normalize_str};
pub use series::{ColumnData, ColumnView, NormalizedSeries, PreviewRow};
pub use types::{
    Channel, DATE_COLUMN, DEFAULT_EXPORT_FILE, EXPORT_TIMESTAMP_FORMAT, TIME_COLUMN,
    TIMESTAMP_COLUMN, TIMESTAMP_FORMAT, required_columns,
};
