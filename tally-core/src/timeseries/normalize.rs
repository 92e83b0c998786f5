use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{DateRange, SeriesPoint, TallyError};

/// Normalize source output to exactly one point per day of `range`.
///
/// - Points are keyed by `period`; duplicate days are summed.
/// - Points outside `range` are dropped.
/// - Days with no point are filled with a zero count.
/// - The result is sorted by day, ascending.
///
/// # Errors
/// Returns `Err(TallyError::Data)` if a point carries a negative value, or if
/// summing duplicate days overflows.
pub fn normalize_daily<I>(points: I, range: DateRange) -> Result<Vec<SeriesPoint>, TallyError>
where
    I: IntoIterator<Item = SeriesPoint>,
{
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for p in points {
        if p.raw.is_sign_negative() && !p.raw.is_zero() {
            return Err(TallyError::Data(format!(
                "source returned negative count {} for {}",
                p.raw, p.period
            )));
        }
        if !range.contains(p.period) {
            #[cfg(feature = "tracing")]
            tracing::debug!(period = %p.period, "dropping point outside requested range");
            continue;
        }
        match by_day.entry(p.period) {
            Entry::Vacant(v) => {
                v.insert(p.raw);
            }
            Entry::Occupied(mut o) => {
                let summed = o.get().checked_add(p.raw).ok_or_else(|| {
                    TallyError::Data(format!("count overflow while summing {}", p.period))
                })?;
                *o.get_mut() = summed;
            }
        }
    }

    Ok(range
        .days()
        .map(|day| SeriesPoint {
            period: day,
            raw: by_day.get(&day).copied().unwrap_or(Decimal::ZERO),
        })
        .collect())
}

/// Whether the series periods are strictly increasing.
#[must_use]
pub fn is_strictly_ordered(series: &[SeriesPoint]) -> bool {
    series.windows(2).all(|w| w[0].period < w[1].period)
}
