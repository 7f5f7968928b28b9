//! Alert records and the alert timeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::mask::first_trigger;
use crate::rules::{Rule, RuleOutcome};

/// Overall state of an alert timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineStatus {
    /// The series had no rows; nothing could be evaluated.
    NoData,
    /// Rules ran and none triggered.
    Clear,
    /// At least one rule triggered.
    Triggered,
}

impl TimelineStatus {
    /// Human-readable summary of the status.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NoData => "No data rows to evaluate.",
            Self::Clear => "No critical alerts detected.",
            Self::Triggered => "Critical alerts detected.",
        }
    }
}

impl std::fmt::Display for TimelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoData => write!(f, "No Data"),
            Self::Clear => write!(f, "Clear"),
            Self::Triggered => write!(f, "Triggered"),
        }
    }
}

/// A triggered rule and when it first held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// The rule that triggered.
    pub rule: Rule,
    /// The rule's fixed message.
    pub message: String,
    /// Index timestamp of the first row where the rule held.
    pub first_triggered_at: NaiveDateTime,
    /// Zero-based position of that row.
    pub first_row: usize,
    /// Number of rows where the rule held.
    pub trigger_count: usize,
}

/// Alert records in rule-declaration order.
///
/// Records are never re-sorted by trigger time: a rule declared earlier is
/// listed first even when a later rule fired sooner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertTimeline {
    /// Overall status.
    pub status: TimelineStatus,
    /// One record per triggered rule.
    pub records: Vec<AlertRecord>,
}

impl AlertTimeline {
    /// Aggregates rule outcomes over the series index `timestamps`.
    ///
    /// Outcomes are taken in the order given, which for
    /// [`evaluate_all`](crate::evaluate_all) is declaration order.
    #[must_use]
    pub fn from_outcomes(outcomes: &[RuleOutcome], timestamps: &[NaiveDateTime]) -> Self {
        if timestamps.is_empty() {
            return Self {
                status: TimelineStatus::NoData,
                records: Vec::new(),
            };
        }

        let records: Vec<AlertRecord> = outcomes
            .iter()
            .filter_map(|outcome| {
                let (first_row, first_triggered_at) = first_trigger(&outcome.mask, timestamps)?;
                Some(AlertRecord {
                    rule: outcome.rule,
                    message: outcome.rule.message().to_string(),
                    first_triggered_at,
                    first_row,
                    trigger_count: outcome.mask.count(),
                })
            })
            .collect();

        let status = if records.is_empty() {
            TimelineStatus::Clear
        } else {
            TimelineStatus::Triggered
        };
        info!(status = %status, alerts = records.len(), "built alert timeline");

        Self { status, records }
    }

    /// The triggered records.
    #[must_use]
    pub fn records(&self) -> &[AlertRecord] {
        &self.records
    }

    /// Messages of the triggered rules, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.message.as_str()).collect()
    }

    /// Returns true if rules ran and none triggered.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.status == TimelineStatus::Clear
    }

    /// The record for `rule`, if it triggered.
    #[must_use]
    pub fn record(&self, rule: Rule) -> Option<&AlertRecord> {
        self.records.iter().find(|r| r.rule == rule)
    }
}
