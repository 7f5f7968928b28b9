//! Analyze command implementation.
//!
//! Runs one [`Session`] over a sensor export and renders the report.

use std::io::Write;

use chrono::NaiveDateTime;
use rig_alerts::{AlertConfig, AlertTimeline, TimelineStatus};
use rig_series::{EXPORT_TIMESTAMP_FORMAT, NormalizeOptions, PreviewRow};
use rig_stats::{ColumnSummary, OverlayRow};
use serde::Serialize;

use crate::cli::AnalyzeArgs;
use crate::error::CliError;
use crate::output::{OutputFormat, SPARKLINE_WIDTH, TableDisplay, format_cell, sparkline, truncate};
use crate::pipeline::{Analysis, AnalysisOptions, Session};

/// Handler for the analyze command.
#[derive(Debug, Default)]
pub struct AnalyzeCommand {
    alerts: AlertConfig,
}

impl AnalyzeCommand {
    /// Creates a handler using the default rule thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the rule thresholds.
    #[must_use]
    pub fn with_alerts(mut self, alerts: AlertConfig) -> Self {
        self.alerts = alerts;
        self
    }

    /// Executes the analyze command.
    ///
    /// # Errors
    ///
    /// Returns error if the export cannot be read, normalized or written, or
    /// if rendering fails.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &AnalyzeArgs,
    ) -> Result<(), CliError> {
        let options = AnalysisOptions {
            normalize: NormalizeOptions {
                sort_by_time: args.sort,
                max_input_bytes: args.max_input_bytes,
            },
            alerts: self.alerts.clone(),
            overlay: args.overlay,
            export_path: args.export_path(),
        };
        let mut session = Session::new(options);
        let analysis = session.analyze_path(&args.file)?;

        let report = AnalysisReport::new(&analysis, args.preview_rows);
        format.write(out, &report)?;
        Ok(())
    }
}

/// Sparkline of one column.
#[derive(Debug, Clone, Serialize)]
pub struct Trend {
    /// Column header.
    pub column: String,
    /// Block-character rendering of the column.
    pub line: String,
}

/// Latest and peak overlay metrics.
#[derive(Debug, Clone, Serialize)]
pub struct OverlayPanel {
    /// Metrics of the last row.
    pub latest: OverlayRow,
    /// Highest overload risk over the whole series.
    pub peak_overload_risk: f64,
}

impl OverlayPanel {
    fn from_rows(rows: &[OverlayRow]) -> Option<Self> {
        let latest = *rows.last()?;
        let peak_overload_risk = rows
            .iter()
            .map(|r| r.overload_risk)
            .fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            latest,
            peak_overload_risk,
        })
    }
}

/// Full analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Number of rows analyzed.
    pub rows: usize,
    /// Column headers in series order.
    pub columns: Vec<String>,
    /// Headers of the columns computed during analysis.
    pub derived_columns: Vec<String>,
    /// First index timestamp.
    pub start: Option<NaiveDateTime>,
    /// Last index timestamp.
    pub end: Option<NaiveDateTime>,
    /// The first rows of the series.
    pub preview: Vec<PreviewRow>,
    /// Triggered rules in declaration order.
    pub alerts: AlertTimeline,
    /// Statistics per column.
    pub statistics: Vec<ColumnSummary>,
    /// Overlay metrics, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<OverlayPanel>,
    /// Where the processed table was written.
    pub export_path: Option<String>,
    #[serde(skip)]
    trends: Vec<Trend>,
}

impl AnalysisReport {
    /// Builds the report for `analysis`, previewing `preview_rows` rows.
    #[must_use]
    pub fn new(analysis: &Analysis, preview_rows: usize) -> Self {
        let series = &analysis.series;
        let trends = series
            .columns()
            .map(|view| Trend {
                column: view.name.to_string(),
                line: sparkline(&view.data.iter().collect::<Vec<_>>(), SPARKLINE_WIDTH),
            })
            .collect();

        let derived_columns = series
            .columns()
            .filter(|view| view.is_derived())
            .map(|view| view.name.to_string())
            .collect();
        let (start, end) = series.span().unzip();

        Self {
            rows: series.len(),
            columns: series.column_names().into_iter().map(str::to_string).collect(),
            derived_columns,
            start,
            end,
            preview: series.head(preview_rows),
            alerts: analysis.timeline.clone(),
            statistics: analysis.summary.columns.clone(),
            overlay: analysis.overlay.as_deref().and_then(OverlayPanel::from_rows),
            export_path: analysis
                .export_path
                .as_ref()
                .map(|p| p.display().to_string()),
            trends,
        }
    }

    fn write_preview<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Preview (first {} of {} rows)", self.preview.len(), self.rows)?;
        write!(writer, "{:<19}", "TIMESTAMP")?;
        for column in &self.columns {
            write!(writer, "  {:>12}", truncate(column, 12))?;
        }
        writeln!(writer)?;
        writeln!(writer, "{}", "─".repeat(19 + 14 * self.columns.len()))?;
        for row in &self.preview {
            write!(writer, "{:<19}", row.timestamp.format(EXPORT_TIMESTAMP_FORMAT))?;
            for value in &row.values {
                write!(writer, "  {:>12}", format_cell(*value))?;
            }
            writeln!(writer)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_trends<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Trends")?;
        for trend in &self.trends {
            writeln!(writer, "  {:<34}  {}", truncate(&trend.column, 34), trend.line)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_alerts<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Alerts")?;
        if self.alerts.status == TimelineStatus::Triggered {
            for message in self.alerts.messages() {
                writeln!(writer, "  ! {message}")?;
            }
        } else {
            writeln!(writer, "  {}", self.alerts.status.description())?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_statistics<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Statistics")?;
        writeln!(
            writer,
            "{:<34}  {:>6}  {:>10}  {:>10}  {:>10}  {:>10}",
            "COLUMN", "COUNT", "MEAN", "STD", "MIN", "MAX"
        )?;
        writeln!(writer, "{}", "─".repeat(90))?;
        for stats in &self.statistics {
            writeln!(
                writer,
                "{:<34}  {:>6}  {:>10}  {:>10}  {:>10}  {:>10}",
                truncate(&stats.column, 34),
                stats.count,
                format_cell(stats.mean),
                format_cell(stats.std),
                format_cell(stats.min),
                format_cell(stats.max)
            )?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_timeline<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Alert Timeline")?;
        if self.alerts.records().is_empty() {
            writeln!(writer, "  {}", self.alerts.status.description())?;
        } else {
            writeln!(writer, "{:<19}  {:>6}  MESSAGE", "FIRST TRIGGERED", "ROWS")?;
            writeln!(writer, "{}", "─".repeat(90))?;
            for record in self.alerts.records() {
                writeln!(
                    writer,
                    "{:<19}  {:>6}  {}",
                    record.first_triggered_at.format(EXPORT_TIMESTAMP_FORMAT),
                    record.trigger_count,
                    record.message
                )?;
            }
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_overlay<W: Write>(&self, writer: &mut W, panel: &OverlayPanel) -> Result<(), CliError> {
        writeln!(writer, "Shaker Overlay (latest row)")?;
        writeln!(writer, "  Shaker Load:       {:>6.1}%", panel.latest.shaker_load)?;
        writeln!(writer, "  Screen Occupancy:  {:>6.1}%", panel.latest.screen_occupancy)?;
        writeln!(writer, "  Overload Risk:     {:>6.1}%", panel.latest.overload_risk)?;
        writeln!(writer, "  Peak Risk:         {:>6.1}%", panel.peak_overload_risk)?;
        writeln!(writer)?;
        Ok(())
    }
}

impl TableDisplay for AnalysisReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Drilling Analysis")?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "Rows:     {}", self.rows)?;
        writeln!(
            writer,
            "Columns:  {} ({} derived)",
            self.columns.len(),
            self.derived_columns.len()
        )?;
        if let (Some(start), Some(end)) = (self.start, self.end) {
            writeln!(
                writer,
                "Span:     {} to {}",
                start.format(EXPORT_TIMESTAMP_FORMAT),
                end.format(EXPORT_TIMESTAMP_FORMAT)
            )?;
        }
        writeln!(writer)?;

        if self.rows == 0 {
            writeln!(writer, "No data")?;
            writeln!(writer, "  {}", self.alerts.status.description())?;
        } else {
            self.write_preview(writer)?;
            self.write_trends(writer)?;
            self.write_alerts(writer)?;
            self.write_statistics(writer)?;
            self.write_timeline(writer)?;
            if let Some(panel) = &self.overlay {
                self.write_overlay(writer, panel)?;
            }
        }

        if let Some(path) = &self.export_path {
            writeln!(writer, "Processed data written to {path}")?;
        }
        Ok(())
    }
}
