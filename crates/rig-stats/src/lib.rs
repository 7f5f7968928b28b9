//! Summary statistics and derived overlay metrics for drilling series.
//!
//! # Example
//!
//! ```rust
//! use rig_series::normalize_str;
//! use rig_stats::summarize;
//!
//! let csv = "YYYY/MM/DD,HH:MM:SS,Rate Of Penetration (ft_per_hr),PLC ROP (ft_per_hr),\
//! Hook Load (klbs),Standpipe Pressure (psi),Pump 1 strokes/min (SPM),Pump 2 strokes/min (SPM),\
//! DAS Vibe Lateral Max (g_force),DAS Vibe Axial Max (g_force),AutoDriller Limiting (unitless),\
//! DAS Vibe WOB Reduce (percent),DAS Vibe RPM Reduce (percent)\n\
//! 01/15/2024,10:00:00,40,40,35,2600,90,90,12,2,0,0,0\n\
//! 01/15/2024,10:01:00,60,60,35,2600,90,90,12,2,0,0,0\n";
//!
//! let series = normalize_str(csv).unwrap();
//! let report = summarize(&series);
//! let rop = report.column("Rate Of Penetration (ft_per_hr)").unwrap();
//! assert_eq!(rop.mean, Some(50.0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod overlay;
pub mod summary;

pub use overlay::{
    OVERLOAD_RISK_COLUMN, OverlayRow, SCREEN_OCCUPANCY_COLUMN, SHAKER_LOAD_COLUMN, apply_overlay,
    overlay_rows,
};
pub use summary::{ColumnSummary, SummaryReport, summarize};
