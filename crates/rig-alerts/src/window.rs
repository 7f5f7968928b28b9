//! Trailing time-window aggregation.

use std::collections::VecDeque;

use chrono::{Duration, NaiveDateTime};

/// Compensated running sum (Neumaier).
#[derive(Debug, Clone, Copy, Default)]
struct RunningSum {
    sum: f64,
    compensation: f64,
}

impl RunningSum {
    fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    fn value(self) -> f64 {
        self.sum + self.compensation
    }
}

/// Mean over a trailing window keyed by elapsed time.
///
/// At each push the window holds the observations with timestamps in
/// `(now - window, now]`. Missing values advance the window but are not
/// counted. Infinite values are tracked separately so they can leave the
/// window without corrupting the finite sum.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: Duration,
    entries: VecDeque<(NaiveDateTime, f64)>,
    finite: RunningSum,
    positive_inf: usize,
    negative_inf: usize,
}

impl RollingMean {
    /// Creates an empty window of the given length.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: VecDeque::new(),
            finite: RunningSum::default(),
            positive_inf: 0,
            negative_inf: 0,
        }
    }

    /// Number of observations currently in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the window holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds an observation at `at` and returns the mean of the window ending
    /// there, or `None` when the window holds no observations.
    ///
    /// Eviction assumes timestamps arrive in non-decreasing order.
    pub fn push(&mut self, at: NaiveDateTime, value: Option<f64>) -> Option<f64> {
        self.evict_before(at);
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            self.entries.push_back((at, v));
            self.account(v, true);
        }
        self.mean()
    }

    fn evict_before(&mut self, now: NaiveDateTime) {
        let Some(cutoff) = now.checked_sub_signed(self.window) else {
            return;
        };
        while let Some(&(at, v)) = self.entries.front() {
            if at > cutoff {
                break;
            }
            self.entries.pop_front();
            self.account(v, false);
        }
        if self.entries.is_empty() {
            self.finite = RunningSum::default();
        }
    }

    fn account(&mut self, value: f64, entering: bool) {
        if value.is_infinite() {
            let counter = if value.is_sign_positive() {
                &mut self.positive_inf
            } else {
                &mut self.negative_inf
            };
            if entering {
                *counter += 1;
            } else {
                *counter -= 1;
            }
        } else if entering {
            self.finite.add(value);
        } else {
            self.finite.add(-value);
        }
    }

    /// Mean of the current window.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        match (self.positive_inf > 0, self.negative_inf > 0) {
            (true, true) => Some(f64::NAN),
            (true, false) => Some(f64::INFINITY),
            (false, true) => Some(f64::NEG_INFINITY),
            (false, false) => Some(self.finite.value() / self.entries.len() as f64),
        }
    }
}

/// Rolling mean of `values` over a trailing time window, one result per row.
///
/// `timestamps` and `values` are zipped; the result has the length of the
/// shorter input.
#[must_use]
pub fn rolling_mean(
    timestamps: &[NaiveDateTime],
    values: &[Option<f64>],
    window: Duration,
) -> Vec<Option<f64>> {
    let mut rolling = RollingMean::new(window);
    timestamps
        .iter()
        .zip(values)
        .map(|(at, value)| rolling.push(*at, *value))
        .collect()
}
