//! Per-period series values before and after redistribution.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One historically recorded bucket of a time series.
///
/// `raw` may be integral (views, clicks) or fractional (averaged or
/// sampled counts). Sequence order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Date identifying the bucket.
    pub period: NaiveDate,
    /// Recorded value for the bucket. Expected to be non-negative.
    pub raw: Decimal,
}

impl SeriesPoint {
    /// Build a point from any value convertible into a [`Decimal`].
    pub fn new(period: NaiveDate, raw: impl Into<Decimal>) -> Self {
        Self {
            period,
            raw: raw.into(),
        }
    }
}

/// One bucket of a redistributed series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustedPoint {
    /// Date identifying the bucket, copied from the input.
    pub period: NaiveDate,
    /// Original recorded value, kept for display and diagnostics.
    pub raw: Decimal,
    /// Whole-unit count after rescaling.
    pub adjusted: u64,
}

/// Output of a redistribution: parallel to the input series, same order and length.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RedistributedSeries {
    /// Adjusted buckets in input order.
    pub points: Vec<AdjustedPoint>,
}

impl RedistributedSeries {
    /// Wrap already-adjusted points.
    #[must_use]
    pub const fn new(points: Vec<AdjustedPoint>) -> Self {
        Self { points }
    }

    /// Sum of all adjusted counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.points.iter().map(|p| p.adjusted).sum()
    }

    /// Adjusted counts in input order.
    #[must_use]
    pub fn adjusted_counts(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.adjusted).collect()
    }

    /// Periods in input order.
    #[must_use]
    pub fn periods(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.period).collect()
    }

    /// Number of buckets.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no buckets.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over adjusted buckets in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, AdjustedPoint> {
        self.points.iter()
    }
}

impl IntoIterator for RedistributedSeries {
    type Item = AdjustedPoint;
    type IntoIter = std::vec::IntoIter<AdjustedPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a RedistributedSeries {
    type Item = &'a AdjustedPoint;
    type IntoIter = std::slice::Iter<'a, AdjustedPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
