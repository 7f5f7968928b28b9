//! Threshold rules and alert timeline for drilling sensor series.
//!
//! `rig-alerts` evaluates the fixed operational rule set over a
//! [`NormalizedSeries`](rig_series::NormalizedSeries) and aggregates the
//! triggered rules into an [`AlertTimeline`].
//!
//! # Rules
//!
//! | # | Rule | Condition |
//! |---|------|-----------|
//! | 1 | ROP volatility | rolling 10 min mean of \|ROP change\| > 50% |
//! | 2 | Stuck pipe | hook load > 60 AND ROP < 1 AND pump 1 SPM == 0 |
//! | 3 | Lateral vibration | lateral max > 25 g |
//! | 4 | AutoDriller limiting | limiting > 0 |
//! | 5 | Vibration mitigation | WOB reduce > 0 OR RPM reduce > 0 |
//!
//! # Example
//!
//! ```rust
//! use rig_alerts::{AlertConfig, AlertTimeline, Rule, evaluate_all};
//! use rig_series::normalize_str;
//!
//! let csv = "YYYY/MM/DD,HH:MM:SS,Rate Of Penetration (ft_per_hr),PLC ROP (ft_per_hr),\
//! Hook Load (klbs),Standpipe Pressure (psi),Pump 1 strokes/min (SPM),Pump 2 strokes/min (SPM),\
//! DAS Vibe Lateral Max (g_force),DAS Vibe Axial Max (g_force),AutoDriller Limiting (unitless),\
//! DAS Vibe WOB Reduce (percent),DAS Vibe RPM Reduce (percent)\n\
//! 01/15/2024,10:00:00,40,40,35,2600,90,90,31.5,2,0,0,0\n";
//!
//! let series = normalize_str(csv).unwrap();
//! let outcomes = evaluate_all(&series, &AlertConfig::default());
//! let timeline = AlertTimeline::from_outcomes(&outcomes, series.timestamps());
//!
//! assert_eq!(timeline.records()[0].rule, Rule::LateralVibration);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod mask;
pub mod rules;
pub mod timeline;
pub mod window;

pub use config::AlertConfig;
pub use error::{AlertError, Result};
pub use mask::{Mask, first_trigger};
pub use rules::{
    DerivedColumn, ROP_CHANGE_COLUMN, Rule, RuleOutcome, abs_pct_change,
    autodriller_limiting_mask, evaluate_all, evaluate_rop_volatility, lateral_vibration_mask,
    stuck_pipe_mask, vibration_mitigation_mask,
};
pub use timeline::{AlertRecord, AlertTimeline, TimelineStatus};
pub use window::{RollingMean, rolling_mean};
