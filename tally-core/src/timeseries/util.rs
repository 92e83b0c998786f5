//! Shared helpers for series validation and invariants.

use crate::{SeriesPoint, TallyError};
use rust_decimal::Decimal;

/// Convert an authoritative total into an unsigned count.
///
/// # Errors
/// Returns `Err(TallyError::InvalidInput)` if `total` is negative.
pub fn ensure_non_negative_total(total: i64) -> Result<u64, TallyError> {
    u64::try_from(total).map_err(|_| {
        TallyError::invalid_input(format!("authoritative total must be >= 0, got {total}"))
    })
}

/// Ensure every recorded value in the series is non-negative.
///
/// # Errors
/// Returns `Err(TallyError::InvalidInput)` naming the first offending period.
pub fn ensure_non_negative_counts(series: &[SeriesPoint]) -> Result<(), TallyError> {
    if let Some(p) = series.iter().find(|p| p.raw.is_sign_negative() && !p.raw.is_zero()) {
        return Err(TallyError::invalid_input(format!(
            "raw count for {} must be >= 0, got {}",
            p.period, p.raw
        )));
    }
    Ok(())
}

/// Sum of the raw values of a series.
///
/// # Errors
/// Returns `Err(TallyError::InvalidInput)` if the sum does not fit in a `Decimal`.
pub fn historical_sum(series: &[SeriesPoint]) -> Result<Decimal, TallyError> {
    weight_sum(series.iter().map(|p| p.raw))
}

pub(crate) fn weight_sum<I>(weights: I) -> Result<Decimal, TallyError>
where
    I: IntoIterator<Item = Decimal>,
{
    weights
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .ok_or_else(|| TallyError::invalid_input("historical sum overflows"))
}
