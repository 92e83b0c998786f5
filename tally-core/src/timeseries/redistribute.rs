use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::timeseries::util::{
    ensure_non_negative_counts, ensure_non_negative_total, historical_sum, weight_sum,
};
use crate::{AdjustedPoint, RedistributedSeries, SeriesPoint, TallyError, ZeroHistoryPolicy};

/// Rescale a historical series so it sums exactly to `authoritative_total`.
///
/// Uses the largest-remainder (Hamilton) method:
/// - each period receives `floor(raw / historical_sum * total)`;
/// - the units lost to flooring are handed out one at a time to the periods
///   with the largest fractional remainders;
/// - equal remainders are resolved in favor of the earlier period.
///
/// If the historical series sums to zero (or is empty) there is no shape to
/// follow and every period is adjusted to zero. See [`redistribute_with`] for
/// an alternative policy.
///
/// The input is not modified; the output has the same length and order.
///
/// ```
/// use tally_core::{NaiveDate, SeriesPoint, redistribute};
///
/// let d = |n| NaiveDate::from_ymd_opt(2024, 5, n).unwrap();
/// let series = vec![
///     SeriesPoint::new(d(1), 10u64),
///     SeriesPoint::new(d(2), 10u64),
///     SeriesPoint::new(d(3), 10u64),
/// ];
/// let out = redistribute(&series, 31).unwrap();
/// assert_eq!(out.adjusted_counts(), vec![11, 10, 10]);
/// assert_eq!(out.total(), 31);
/// ```
///
/// # Errors
/// Returns `Err(TallyError::InvalidInput)` if `authoritative_total` is negative,
/// if any raw value is negative, or if the historical sum overflows.
pub fn redistribute(
    series: &[SeriesPoint],
    authoritative_total: i64,
) -> Result<RedistributedSeries, TallyError> {
    redistribute_with(series, authoritative_total, ZeroHistoryPolicy::Zeros)
}

/// Same as [`redistribute`] with an explicit policy for a zero-weight history.
///
/// With [`ZeroHistoryPolicy::Uniform`] a non-empty series whose raw values are
/// all zero is treated as if every period had weight 1, so the total is spread
/// evenly and the leftover units land on the earliest periods.
///
/// # Errors
/// Same conditions as [`redistribute`].
pub fn redistribute_with(
    series: &[SeriesPoint],
    authoritative_total: i64,
    policy: ZeroHistoryPolicy,
) -> Result<RedistributedSeries, TallyError> {
    let total = ensure_non_negative_total(authoritative_total)?;
    ensure_non_negative_counts(series)?;
    let sum = historical_sum(series)?;

    let counts = if sum.is_zero() {
        match policy {
            ZeroHistoryPolicy::Zeros => vec![0; series.len()],
            ZeroHistoryPolicy::Uniform => apportion(&vec![Decimal::ONE; series.len()], total)?,
        }
    } else {
        let weights: Vec<Decimal> = series.iter().map(|p| p.raw).collect();
        apportion(&weights, total)?
    };

    let points = series
        .iter()
        .zip(counts)
        .map(|(p, adjusted)| AdjustedPoint {
            period: p.period,
            raw: p.raw,
            adjusted,
        })
        .collect();
    Ok(RedistributedSeries::new(points))
}

/// Split `total` into whole units proportional to `weights`.
///
/// Returns one count per weight, in order. The counts sum to `total` unless
/// the weights sum to zero (or are empty), in which case every count is zero.
///
/// # Errors
/// Returns `Err(TallyError::InvalidInput)` if a weight is negative or the
/// weights overflow when summed.
pub fn apportion(weights: &[Decimal], total: u64) -> Result<Vec<u64>, TallyError> {
    if let Some(w) = weights.iter().find(|w| w.is_sign_negative() && !w.is_zero()) {
        return Err(TallyError::invalid_input(format!(
            "weights must be >= 0, got {w}"
        )));
    }
    let sum = weight_sum(weights.iter().copied())?;
    if sum.is_zero() {
        return Ok(vec![0; weights.len()]);
    }

    let total_dec = Decimal::from(total);
    let mut counts: Vec<u64> = Vec::with_capacity(weights.len());
    let mut remainders: Vec<(usize, Decimal)> = Vec::with_capacity(weights.len());
    let mut distributed: u64 = 0;

    for (i, &w) in weights.iter().enumerate() {
        let share = share_of(w, sum, total_dec);
        let floor = share.floor();
        // 0 <= share <= total, so the floor always fits.
        let whole = floor.to_u64().unwrap_or_default();
        counts.push(whole);
        remainders.push((i, share - floor));
        distributed = distributed.saturating_add(whole);
    }

    let deficit = usize::try_from(total.saturating_sub(distributed)).unwrap_or(usize::MAX);
    // Stable sort: equal remainders keep input order.
    remainders.sort_by(|a, b| b.1.cmp(&a.1));
    for &(i, _) in remainders.iter().take(deficit) {
        counts[i] += 1;
    }
    Ok(counts)
}

/// Exact (real-valued) share of each period before flooring.
///
/// Zero-weight histories yield all-zero shares.
///
/// # Errors
/// Same conditions as [`redistribute`].
pub fn exact_shares(
    series: &[SeriesPoint],
    authoritative_total: i64,
) -> Result<Vec<Decimal>, TallyError> {
    let total = ensure_non_negative_total(authoritative_total)?;
    ensure_non_negative_counts(series)?;
    let sum = historical_sum(series)?;
    if sum.is_zero() {
        return Ok(vec![Decimal::ZERO; series.len()]);
    }
    let total_dec = Decimal::from(total);
    Ok(series
        .iter()
        .map(|p| share_of(p.raw, sum, total_dec))
        .collect())
}

// Multiply before dividing so integral inputs stay exact; fall back to
// dividing first when the product would overflow.
fn share_of(weight: Decimal, sum: Decimal, total: Decimal) -> Decimal {
    weight
        .checked_mul(total)
        .and_then(|n| n.checked_div(sum))
        .or_else(|| weight.checked_div(sum).and_then(|f| f.checked_mul(total)))
        .unwrap_or(Decimal::ZERO)
}
