//! Boolean masks over a series index.

use chrono::NaiveDateTime;

/// One boolean per row of a series.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mask(Vec<bool>);

impl Mask {
    /// Wraps a vector of row flags.
    #[must_use]
    pub const fn new(flags: Vec<bool>) -> Self {
        Self(flags)
    }

    /// Builds a mask by applying `predicate` to every value.
    pub fn from_values<F>(values: &[f64], predicate: F) -> Self
    where
        F: Fn(f64) -> bool,
    {
        Self(values.iter().map(|v| predicate(*v)).collect())
    }

    /// Row-wise logical AND. The result has the length of the shorter mask.
    #[must_use]
    pub fn and(&self, other: &Self) -> Self {
        Self(self.0.iter().zip(&other.0).map(|(a, b)| *a && *b).collect())
    }

    /// Row-wise logical OR. The result has the length of the shorter mask.
    #[must_use]
    pub fn or(&self, other: &Self) -> Self {
        Self(self.0.iter().zip(&other.0).map(|(a, b)| *a || *b).collect())
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the mask covers no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if any row is set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.0.iter().any(|b| *b)
    }

    /// Number of rows that are set.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }

    /// Position of the first set row.
    #[must_use]
    pub fn first_true(&self) -> Option<usize> {
        self.0.iter().position(|b| *b)
    }

    /// The row flags.
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl FromIterator<bool> for Mask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Timestamp of the first set row of `mask`.
///
/// Ties in the index resolve to the earliest row, since rows are scanned in
/// order.
#[must_use]
pub fn first_trigger(mask: &Mask, timestamps: &[NaiveDateTime]) -> Option<(usize, NaiveDateTime)> {
    let row = mask.first_true()?;
    timestamps.get(row).map(|ts| (row, *ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, minute, 0))
            .expect("valid timestamp")
    }

    #[test]
    fn combinators_are_row_wise() {
        let a = Mask::new(vec![true, true, false, false]);
        let b = Mask::new(vec![true, false, true, false]);
        assert_eq!(a.and(&b).as_slice(), &[true, false, false, false]);
        assert_eq!(a.or(&b).as_slice(), &[true, true, true, false]);
    }

    #[test]
    fn from_values_applies_predicate() {
        let mask = Mask::from_values(&[10.0, 25.0, 25.1], |v| v > 25.0);
        assert_eq!(mask.as_slice(), &[false, false, true]);
        assert_eq!(mask.count(), 1);
    }

    #[test]
    fn first_trigger_finds_earliest_row() {
        let mask = Mask::new(vec![false, true, true]);
        let stamps = [ts(0), ts(1), ts(2)];
        assert_eq!(first_trigger(&mask, &stamps), Some((1, ts(1))));
    }

    #[test]
    fn first_trigger_with_duplicate_timestamps_uses_row_order() {
        let mask = Mask::new(vec![false, true, true]);
        let stamps = [ts(0), ts(5), ts(5)];
        assert_eq!(first_trigger(&mask, &stamps), Some((1, ts(5))));
    }

    #[test]
    fn empty_mask_has_no_trigger() {
        let mask = Mask::default();
        assert!(!mask.any());
        assert!(mask.is_empty());
        assert_eq!(first_trigger(&mask, &[]), None);

        let none_set: Mask = [false, false].into_iter().collect();
        assert_eq!(first_trigger(&none_set, &[ts(0), ts(1)]), None);
    }
}
