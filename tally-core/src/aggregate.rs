//! Filter-and-sum helper for deriving live totals and rates from records.
//!
//! Dashboards typically compute the same figures over several collections
//! (events, hackathons, both combined): keep the approved records, sum two
//! counters, derive a ratio. [`summarize`] does that once for any record type,
//! and [`Totals::combine`] joins partial results without re-scanning.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sums of a primary and secondary counter over the records that passed a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of the primary counter (e.g. views).
    pub primary: Decimal,
    /// Sum of the secondary counter (e.g. clicks).
    pub secondary: Decimal,
    /// Number of records included.
    pub count: usize,
}

impl Totals {
    /// `secondary / primary`, or `None` when `primary` is zero.
    #[must_use]
    pub fn rate(&self) -> Option<Decimal> {
        if self.primary.is_zero() {
            return None;
        }
        self.secondary.checked_div(self.primary)
    }

    /// [`rate`](Self::rate) expressed as a percentage rounded to two decimals.
    #[must_use]
    pub fn rate_percent(&self) -> Option<Decimal> {
        self.rate()
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .map(|p| p.round_dp(2))
    }

    /// Join two partial totals. Sums saturate at `Decimal::MAX`.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            primary: self.primary.saturating_add(other.primary),
            secondary: self.secondary.saturating_add(other.secondary),
            count: self.count + other.count,
        }
    }
}

/// Sum two counters over the items that pass `filter`.
///
/// ```
/// use tally_core::Decimal;
/// use tally_core::aggregate::summarize;
///
/// struct Listing { approved: bool, views: u64, clicks: u64 }
/// let listings = [
///     Listing { approved: true, views: 200, clicks: 10 },
///     Listing { approved: false, views: 900, clicks: 90 },
///     Listing { approved: true, views: 300, clicks: 40 },
/// ];
/// let t = summarize(&listings, |l: &Listing| l.approved, |l: &Listing| l.views.into(), |l: &Listing| l.clicks.into());
/// assert_eq!(t.count, 2);
/// assert_eq!(t.primary, Decimal::from(500));
/// assert_eq!(t.rate_percent(), Some(Decimal::from(10)));
/// ```
pub fn summarize<'a, T, I, F, P, S>(items: I, filter: F, primary: P, secondary: S) -> Totals
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> bool,
    P: Fn(&T) -> Decimal,
    S: Fn(&T) -> Decimal,
{
    items
        .into_iter()
        .filter(|item| filter(item))
        .fold(Totals::default(), |acc, item| Totals {
            primary: acc.primary.saturating_add(primary(item)),
            secondary: acc.secondary.saturating_add(secondary(item)),
            count: acc.count + 1,
        })
}
