//! The fixed operational rule set.
//!
//! Each rule reads the normalized series and produces a [`Mask`] with one flag
//! per row. Rules are independent: none sees another's result, and all of them
//! run on every evaluation.

use rig_series::{Channel, NormalizedSeries};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AlertConfig;
use crate::mask::Mask;
use crate::window::rolling_mean;

/// Name of the derived column holding the absolute ROP change ratio.
pub const ROP_CHANGE_COLUMN: &str = "ROP_change";

/// A rule of the fixed set, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Rolling mean of the ROP change ratio is too high.
    RopVolatility,
    /// High hook load with the bit stalled and pump 1 off.
    StuckPipe,
    /// Lateral vibration above the limit.
    LateralVibration,
    /// AutoDriller is constraining drilling parameters.
    AutoDrillerLimiting,
    /// Vibration mitigation is reducing WOB or RPM.
    VibrationMitigation,
}

impl Rule {
    /// Every rule, in the order it is evaluated and reported.
    pub const ALL: [Self; 5] = [
        Self::RopVolatility,
        Self::StuckPipe,
        Self::LateralVibration,
        Self::AutoDrillerLimiting,
        Self::VibrationMitigation,
    ];

    /// Stable identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::RopVolatility => "rop_volatility",
            Self::StuckPipe => "stuck_pipe",
            Self::LateralVibration => "lateral_vibration",
            Self::AutoDrillerLimiting => "autodriller_limiting",
            Self::VibrationMitigation => "vibration_mitigation",
        }
    }

    /// The operator-facing alert message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::RopVolatility => "Significant ROP fluctuation (>50% in 10 min) detected.",
            Self::StuckPipe => {
                "High hook load while pumps are off and ROP is near zero. Possible stuck pipe."
            }
            Self::LateralVibration => "Excessive lateral vibration detected (>25g).",
            Self::AutoDrillerLimiting => "AutoDriller limiting detected.",
            Self::VibrationMitigation => "DAS vibration mitigation active.",
        }
    }

    /// A one-line statement of the condition with the thresholds in `config`.
    #[must_use]
    pub fn condition(self, config: &AlertConfig) -> String {
        match self {
            Self::RopVolatility => format!(
                "rolling mean of |ROP change| over {}s > {}",
                config.rop_window_seconds, config.rop_change_threshold
            ),
            Self::StuckPipe => format!(
                "hook load > {} klbs AND ROP < {} ft/hr AND pump 1 SPM == {}",
                config.stuck_pipe_min_hook_load, config.stuck_pipe_max_rop, config.stuck_pipe_pump_spm
            ),
            Self::LateralVibration => {
                format!("lateral vibration max > {} g", config.lateral_vibration_limit)
            }
            Self::AutoDrillerLimiting => format!(
                "AutoDriller limiting > {}",
                config.autodriller_limiting_threshold
            ),
            Self::VibrationMitigation => format!(
                "WOB reduce > {0}% OR RPM reduce > {0}%",
                config.mitigation_threshold
            ),
        }
    }

    /// Evaluates this rule over `series`.
    #[must_use]
    pub fn evaluate(self, series: &NormalizedSeries, config: &AlertConfig) -> RuleOutcome {
        match self {
            Self::RopVolatility => evaluate_rop_volatility(series, config),
            Self::StuckPipe => RuleOutcome::new(self, stuck_pipe_mask(series, config)),
            Self::LateralVibration => RuleOutcome::new(self, lateral_vibration_mask(series, config)),
            Self::AutoDrillerLimiting => {
                RuleOutcome::new(self, autodriller_limiting_mask(series, config))
            }
            Self::VibrationMitigation => {
                RuleOutcome::new(self, vibration_mitigation_mask(series, config))
            }
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// A helper column a rule computed while evaluating.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedColumn {
    /// Column header.
    pub name: &'static str,
    /// One value per row; `None` where undefined.
    pub values: Vec<Option<f64>>,
}

/// Result of evaluating one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    /// The rule evaluated.
    pub rule: Rule,
    /// Rows where the rule's condition holds.
    pub mask: Mask,
    /// Helper column produced along the way, if any.
    pub derived: Option<DerivedColumn>,
}

impl RuleOutcome {
    /// Creates an outcome with no derived column.
    #[must_use]
    pub const fn new(rule: Rule, mask: Mask) -> Self {
        Self {
            rule,
            mask,
            derived: None,
        }
    }

    /// Returns true if the condition held on at least one row.
    #[must_use]
    pub fn triggered(&self) -> bool {
        self.mask.any()
    }
}

/// Absolute fractional change between consecutive values.
///
/// The first row has no predecessor and counts as no change (`0.0`), so it
/// takes part in the rolling mean without ever triggering on its own. A change
/// from zero to zero is undefined (`None`); from zero to anything else it is
/// infinite.
#[must_use]
pub fn abs_pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(Some(0.0));
    out.extend(values.windows(2).map(|w| {
        let change = (w[1] / w[0] - 1.0).abs();
        (!change.is_nan()).then_some(change)
    }));
    out
}

/// Rule 1: rolling mean of the ROP change ratio over the trailing window.
#[must_use]
pub fn evaluate_rop_volatility(series: &NormalizedSeries, config: &AlertConfig) -> RuleOutcome {
    let change = abs_pct_change(series.channel(Channel::RateOfPenetration));
    let means = rolling_mean(series.timestamps(), &change, config.rop_window());
    let mask = means
        .iter()
        .map(|m| m.is_some_and(|m| m > config.rop_change_threshold))
        .collect();

    RuleOutcome {
        rule: Rule::RopVolatility,
        mask,
        derived: Some(DerivedColumn {
            name: ROP_CHANGE_COLUMN,
            values: change,
        }),
    }
}

/// Rule 2: hook load high, ROP stalled and pump 1 stopped on the same row.
///
/// Pump 2 is not consulted.
#[must_use]
pub fn stuck_pipe_mask(series: &NormalizedSeries, config: &AlertConfig) -> Mask {
    let hook_load = Mask::from_values(series.channel(Channel::HookLoad), |v| {
        v > config.stuck_pipe_min_hook_load
    });
    let stalled = Mask::from_values(series.channel(Channel::RateOfPenetration), |v| {
        v < config.stuck_pipe_max_rop
    });
    #[allow(clippy::float_cmp)]
    let pumps_off = Mask::from_values(series.channel(Channel::Pump1Spm), |v| {
        v == config.stuck_pipe_pump_spm
    });
    hook_load.and(&stalled).and(&pumps_off)
}

/// Rule 3: lateral vibration strictly above the limit.
#[must_use]
pub fn lateral_vibration_mask(series: &NormalizedSeries, config: &AlertConfig) -> Mask {
    Mask::from_values(series.channel(Channel::LateralVibeMax), |v| {
        v > config.lateral_vibration_limit
    })
}

/// Rule 4: AutoDriller limiting indicator set.
#[must_use]
pub fn autodriller_limiting_mask(series: &NormalizedSeries, config: &AlertConfig) -> Mask {
    Mask::from_values(series.channel(Channel::AutoDrillerLimiting), |v| {
        v > config.autodriller_limiting_threshold
    })
}

/// Rule 5: either mitigation percentage above zero.
#[must_use]
pub fn vibration_mitigation_mask(series: &NormalizedSeries, config: &AlertConfig) -> Mask {
    let wob = Mask::from_values(series.channel(Channel::WobReduce), |v| {
        v > config.mitigation_threshold
    });
    let rpm = Mask::from_values(series.channel(Channel::RpmReduce), |v| {
        v > config.mitigation_threshold
    });
    wob.or(&rpm)
}

/// Evaluates every rule in declaration order.
#[must_use]
pub fn evaluate_all(series: &NormalizedSeries, config: &AlertConfig) -> Vec<RuleOutcome> {
    Rule::ALL
        .iter()
        .map(|rule| {
            let outcome = rule.evaluate(series, config);
            debug!(
                rule = %rule,
                triggered = outcome.triggered(),
                rows = outcome.mask.count(),
                "evaluated rule"
            );
            outcome
        })
        .collect()
}
