pub mod history;
pub mod listings;

use tally_core::NaiveDate;

/// Days of March 2024; out-of-calendar days are skipped.
fn march(rows: &[(u32, u64)]) -> Vec<(NaiveDate, u64)> {
    rows.iter()
        .filter_map(|&(d, v)| NaiveDate::from_ymd_opt(2024, 3, d).map(|day| (day, v)))
        .collect()
}
