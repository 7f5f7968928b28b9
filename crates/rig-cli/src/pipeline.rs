//! One analysis session: normalize, evaluate, summarize, export.
//!
//! A [`Session`] walks a single linear pass through [`SessionState`]. Any
//! failure resets it to [`SessionState::Empty`] and hands the error back;
//! nothing from the failed run is kept.

use std::io::Read;
use std::path::{Path, PathBuf};

use rig_alerts::{AlertConfig, AlertTimeline, evaluate_all};
use rig_series::{NormalizeOptions, NormalizedSeries, SeriesReader, write_csv_path};
use rig_stats::{OverlayRow, SummaryReport, apply_overlay, summarize};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;

/// Where a session is in its pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No data loaded.
    Empty,
    /// Reading and normalizing input.
    Parsing,
    /// Input normalized; rules not yet run.
    Normalized,
    /// Rules evaluated and statistics computed.
    RulesEvaluated,
    /// Results exported and ready for display.
    Reported,
}

/// Settings for one analysis pass.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Normalizer settings.
    pub normalize: NormalizeOptions,
    /// Rule thresholds.
    pub alerts: AlertConfig,
    /// Append the shaker and screen overlay columns.
    pub overlay: bool,
    /// Destination of the processed table; `None` skips the export.
    pub export_path: Option<PathBuf>,
}

/// Everything one pass produced.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The normalized series, derived columns included.
    pub series: NormalizedSeries,
    /// Triggered rules in declaration order.
    pub timeline: AlertTimeline,
    /// Statistics over every column of `series`.
    pub summary: SummaryReport,
    /// Overlay metrics per row, when requested.
    pub overlay: Option<Vec<OverlayRow>>,
    /// Where the processed table was written.
    pub export_path: Option<PathBuf>,
}

/// Drives a single analysis pass.
#[derive(Debug)]
pub struct Session {
    options: AnalysisOptions,
    state: SessionState,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub const fn new(options: AnalysisOptions) -> Self {
        Self {
            options,
            state: SessionState::Empty,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Analyzes the export at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert configuration is invalid, the input
    /// cannot be read or normalized, or the export cannot be written. The
    /// session is back in [`SessionState::Empty`] afterwards.
    pub fn analyze_path(&mut self, path: &Path) -> Result<Analysis> {
        info!(path = %path.display(), "starting analysis");
        let reader = SeriesReader::new(self.options.normalize.clone());
        self.run(|| reader.read_path(path))
    }

    /// Analyzes an export from any byte source.
    ///
    /// # Errors
    ///
    /// See [`Session::analyze_path`].
    pub fn analyze_reader<R: Read>(&mut self, input: R) -> Result<Analysis> {
        let reader = SeriesReader::new(self.options.normalize.clone());
        self.run(|| reader.read(input))
    }

    fn run<F>(&mut self, load: F) -> Result<Analysis>
    where
        F: FnOnce() -> rig_series::Result<NormalizedSeries>,
    {
        let result = self.pass(load);
        if result.is_err() {
            self.transition(SessionState::Empty);
        }
        result
    }

    fn pass<F>(&mut self, load: F) -> Result<Analysis>
    where
        F: FnOnce() -> rig_series::Result<NormalizedSeries>,
    {
        self.options.alerts.validate()?;

        self.transition(SessionState::Parsing);
        let mut series = load()?;
        self.transition(SessionState::Normalized);

        let mut outcomes = evaluate_all(&series, &self.options.alerts);
        for outcome in &mut outcomes {
            if let Some(derived) = outcome.derived.take() {
                series.push_derived(derived.name, derived.values)?;
            }
        }
        let overlay = if self.options.overlay {
            Some(apply_overlay(&mut series)?)
        } else {
            None
        };
        let timeline = AlertTimeline::from_outcomes(&outcomes, series.timestamps());
        let summary = summarize(&series);
        self.transition(SessionState::RulesEvaluated);

        let export_path = self.options.export_path.clone();
        if let Some(path) = &export_path {
            write_csv_path(&series, path)?;
        }
        self.transition(SessionState::Reported);

        Ok(Analysis {
            series,
            timeline,
            summary,
            overlay,
            export_path,
        })
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = ?self.state, to = ?next, "session transition");
        self.state = next;
    }
}
