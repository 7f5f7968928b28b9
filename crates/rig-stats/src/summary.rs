//! Descriptive statistics per column.

use rig_series::{ColumnView, NormalizedSeries};
use serde::Serialize;
use tracing::debug;

/// Statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    /// Column header.
    pub column: String,
    /// Number of non-missing values.
    pub count: usize,
    /// Arithmetic mean; `None` when `count` is 0.
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1); `None` when `count` < 2.
    pub std: Option<f64>,
    /// Smallest value; `None` when `count` is 0.
    pub min: Option<f64>,
    /// Largest value; `None` when `count` is 0.
    pub max: Option<f64>,
}

impl ColumnSummary {
    /// Summarizes a sequence of values, skipping missing and NaN entries.
    pub fn from_values(column: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        let values: Vec<f64> = values
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        let count = values.len();

        let mean = (count > 0).then(|| {
            let n = count as f64;
            let rough = values.iter().sum::<f64>() / n;
            if !rough.is_finite() {
                return rough;
            }
            // Second pass removes the rounding error of the first.
            rough + values.iter().map(|v| v - rough).sum::<f64>() / n
        });
        let std = mean.filter(|_| count > 1).map(|mean| {
            let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });
        let min = values.iter().copied().reduce(f64::min);
        let max = values.iter().copied().reduce(f64::max);

        Self {
            column: column.into(),
            count,
            mean,
            std,
            min,
            max,
        }
    }

    fn from_view(view: ColumnView<'_>) -> Self {
        Self::from_values(view.name, view.data.iter())
    }
}

/// Statistics for every column of a series, in series order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    /// Number of rows in the series.
    pub rows: usize,
    /// One entry per column.
    pub columns: Vec<ColumnSummary>,
}

impl SummaryReport {
    /// The summary for `column`, if present.
    #[must_use]
    pub fn column(&self, column: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.column == column)
    }
}

/// Summarizes every column currently in `series`, derived columns included.
#[must_use]
pub fn summarize(series: &NormalizedSeries) -> SummaryReport {
    let columns: Vec<ColumnSummary> = series.columns().map(ColumnSummary::from_view).collect();
    debug!(rows = series.len(), columns = columns.len(), "summarized series");
    SummaryReport {
        rows: series.len(),
        columns,
    }
}
