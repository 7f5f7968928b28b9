//! Rule thresholds.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{AlertError, Result};

/// Threshold configuration for the rule set.
///
/// [`AlertConfig::default`] holds the operational constants; other values
/// exist so tests can substitute them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Rolling mean of the absolute ROP change ratio above which rule 1 fires.
    pub rop_change_threshold: f64,
    /// Length of the trailing ROP window (seconds).
    pub rop_window_seconds: u64,
    /// Hook load above which a stuck pipe is suspected (klbs).
    pub stuck_pipe_min_hook_load: f64,
    /// ROP below which the bit is considered stalled (ft/hr).
    pub stuck_pipe_max_rop: f64,
    /// Pump 1 stroke rate that counts as "pumps off" (SPM, compared exactly).
    pub stuck_pipe_pump_spm: f64,
    /// Lateral vibration maximum above which rule 3 fires (g).
    pub lateral_vibration_limit: f64,
    /// AutoDriller limiting indicator above which rule 4 fires.
    pub autodriller_limiting_threshold: f64,
    /// WOB/RPM reduction percentage above which mitigation counts as active.
    pub mitigation_threshold: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            rop_change_threshold: 0.5,
            rop_window_seconds: 600,
            stuck_pipe_min_hook_load: 60.0,
            stuck_pipe_max_rop: 1.0,
            stuck_pipe_pump_spm: 0.0,
            lateral_vibration_limit: 25.0,
            autodriller_limiting_threshold: 0.0,
            mitigation_threshold: 0.0,
        }
    }
}

impl AlertConfig {
    /// The ROP window as a [`chrono::Duration`].
    #[must_use]
    pub fn rop_window(&self) -> Duration {
        i64::try_from(self.rop_window_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }

    /// Checks that every threshold is a finite number and the window is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::InvalidConfig`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.rop_window_seconds == 0 {
            return Err(AlertError::InvalidConfig {
                reason: "ROP window must be positive".to_string(),
            });
        }
        let thresholds = [
            ("rop_change_threshold", self.rop_change_threshold),
            ("stuck_pipe_min_hook_load", self.stuck_pipe_min_hook_load),
            ("stuck_pipe_max_rop", self.stuck_pipe_max_rop),
            ("stuck_pipe_pump_spm", self.stuck_pipe_pump_spm),
            ("lateral_vibration_limit", self.lateral_vibration_limit),
            ("autodriller_limiting_threshold", self.autodriller_limiting_threshold),
            ("mitigation_threshold", self.mitigation_threshold),
        ];
        if let Some((name, _)) = thresholds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AlertError::InvalidConfig {
                reason: format!("{name} must be finite"),
            });
        }
        Ok(())
    }
}
