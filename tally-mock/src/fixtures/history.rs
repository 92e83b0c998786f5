use tally_core::{MetricKey, SeriesPoint};

use super::march;

/// Recorded per-day counts. `acme` has no row for March 4th.
pub fn by_owner(owner: &str, metric: &MetricKey) -> Option<Vec<SeriesPoint>> {
    let rows: &[(u32, u64)] = match (owner, metric.as_str()) {
        ("acme", MetricKey::VIEWS) => &[(1, 120), (2, 80), (3, 95), (5, 60), (6, 150), (7, 95)],
        ("acme", MetricKey::CLICKS) => &[(1, 6), (2, 4), (3, 5), (5, 3), (6, 9), (7, 5)],
        ("newco", MetricKey::VIEWS | MetricKey::CLICKS) => &[],
        ("NEGATIVE", MetricKey::VIEWS | MetricKey::CLICKS) => &[(1, 3), (2, 2)],
        _ => return None,
    };
    Some(
        march(rows)
            .into_iter()
            .map(|(day, v)| SeriesPoint::new(day, v))
            .collect(),
    )
}
