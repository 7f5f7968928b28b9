//! The normalized, time-indexed sensor table.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SeriesError};
use crate::types::Channel;

/// Where a column of the series comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnRef {
    Channel(Channel),
    Derived(usize),
}

#[derive(Debug, Clone, PartialEq)]
struct DerivedColumn {
    name: String,
    values: Vec<Option<f64>>,
}

/// Borrowed values of one column.
///
/// Source channels always have a value on every row; derived columns may not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnData<'a> {
    /// A source channel column.
    Measured(&'a [f64]),
    /// A column computed from other columns.
    Derived(&'a [Option<f64>]),
}

impl<'a> ColumnData<'a> {
    /// Number of rows.
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Self::Measured(v) => v.len(),
            Self::Derived(v) => v.len(),
        }
    }

    /// Returns true if the column has no rows.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Value at `row`, `None` when out of range or missing.
    #[must_use]
    pub fn get(self, row: usize) -> Option<f64> {
        match self {
            Self::Measured(v) => v.get(row).copied(),
            Self::Derived(v) => v.get(row).copied().flatten(),
        }
    }

    /// Iterates over every row, yielding `None` for missing values.
    pub fn iter(self) -> impl Iterator<Item = Option<f64>> + 'a {
        (0..self.len()).map(move |row| self.get(row))
    }
}

/// A named column view into a [`NormalizedSeries`].
#[derive(Debug, Clone, Copy)]
pub struct ColumnView<'a> {
    /// Column header.
    pub name: &'a str,
    /// The column values.
    pub data: ColumnData<'a>,
}

impl ColumnView<'_> {
    /// Returns true if this column was computed rather than read from the export.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        matches!(self.data, ColumnData::Derived(_))
    }
}

/// One row of the preview table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewRow {
    /// Index timestamp.
    pub timestamp: NaiveDateTime,
    /// Values in column order.
    pub values: Vec<Option<f64>>,
}

/// A time-indexed table of sensor channels plus any derived columns.
///
/// Rows keep the order the normalizer produced them in. Columns keep the order
/// the channels appeared in the source header, followed by derived columns in
/// the order they were first added.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    timestamps: Vec<NaiveDateTime>,
    channels: Vec<Vec<f64>>,
    derived: Vec<DerivedColumn>,
    order: Vec<ColumnRef>,
}

impl NormalizedSeries {
    /// Builds a series from parsed rows.
    ///
    /// `channel_order` lists the channels in header order and must contain
    /// each channel exactly once. `rows` holds one value per channel, indexed
    /// by [`Channel::index`].
    pub(crate) fn from_rows(
        channel_order: Vec<Channel>,
        rows: Vec<(NaiveDateTime, [f64; Channel::COUNT])>,
    ) -> Self {
        let mut timestamps = Vec::with_capacity(rows.len());
        let mut channels = vec![Vec::with_capacity(rows.len()); Channel::COUNT];
        for (timestamp, values) in rows {
            timestamps.push(timestamp);
            for (column, value) in channels.iter_mut().zip(values) {
                column.push(value);
            }
        }
        Self {
            timestamps,
            channels,
            derived: Vec::new(),
            order: channel_order.into_iter().map(ColumnRef::Channel).collect(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns true if the series has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// The index, one timestamp per row.
    #[must_use]
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Values of a source channel.
    #[must_use]
    pub fn channel(&self, channel: Channel) -> &[f64] {
        &self.channels[channel.index()]
    }

    /// Number of columns, derived columns included.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.order.len()
    }

    /// Column headers in series order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns().map(|c| c.name).collect()
    }

    /// Iterates over every column in series order.
    pub fn columns(&self) -> impl Iterator<Item = ColumnView<'_>> + '_ {
        self.order.iter().map(move |column| self.view(*column))
    }

    /// Looks a column up by header.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<ColumnView<'_>> {
        self.columns().find(|c| c.name == name)
    }

    fn view(&self, column: ColumnRef) -> ColumnView<'_> {
        match column {
            ColumnRef::Channel(channel) => ColumnView {
                name: channel.header(),
                data: ColumnData::Measured(&self.channels[channel.index()]),
            },
            ColumnRef::Derived(i) => ColumnView {
                name: &self.derived[i].name,
                data: ColumnData::Derived(&self.derived[i].values),
            },
        }
    }

    /// Adds a derived column, or replaces the values of an existing derived
    /// column with the same name. Replacing keeps the column's position.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] when `values` does not have one
    /// entry per row, and [`SeriesError::ReservedColumn`] when `name` is a
    /// source channel header.
    pub fn push_derived(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<()> {
        let name = name.into();
        if Channel::from_header(&name).is_some() {
            return Err(SeriesError::ReservedColumn { name });
        }
        if values.len() != self.len() {
            return Err(SeriesError::LengthMismatch {
                name,
                expected: self.len(),
                actual: values.len(),
            });
        }

        if let Some(existing) = self.derived.iter_mut().find(|d| d.name == name) {
            debug!(column = %name, "replacing derived column");
            existing.values = values;
        } else {
            debug!(column = %name, "adding derived column");
            self.order.push(ColumnRef::Derived(self.derived.len()));
            self.derived.push(DerivedColumn { name, values });
        }
        Ok(())
    }

    /// The first `n` rows, all columns included.
    #[must_use]
    pub fn head(&self, n: usize) -> Vec<PreviewRow> {
        let columns: Vec<ColumnView<'_>> = self.columns().collect();
        self.timestamps
            .iter()
            .take(n)
            .enumerate()
            .map(|(row, timestamp)| PreviewRow {
                timestamp: *timestamp,
                values: columns.iter().map(|c| c.data.get(row)).collect(),
            })
            .collect()
    }

    /// Returns true if the index never goes backwards.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.timestamps.windows(2).all(|w| w[0] <= w[1])
    }

    /// First and last timestamps of the index.
    #[must_use]
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((*self.timestamps.first()?, *self.timestamps.last()?))
    }
}
