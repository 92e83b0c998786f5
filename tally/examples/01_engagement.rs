use std::sync::Arc;

use tally::{NaiveDate, Tally};
use tally_mock::MockSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the orchestrator with the deterministic mock source.
    let tally = Tally::builder()
        .with_connector(Arc::new(MockSource::new()))
        .build()?;

    // 2. Reconcile a week of views and clicks for one company.
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("invalid start")?;
    let end = NaiveDate::from_ymd_opt(2024, 3, 7).ok_or("invalid end")?;
    let report = tally.engagement("acme", start, end).await?;

    // 3. Print the per-day breakdown; columns sum to the live totals.
    println!("{:<12}{:>8}{:>8}{:>10}", "day", "views", "clicks", "ctr %");
    for p in &report.per_period {
        let ctr = p
            .rate
            .map(|r| (r * tally::Decimal::ONE_HUNDRED).round_dp(2).to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<12}{:>8}{:>8}{:>10}", p.period, p.views, p.clicks, ctr);
    }
    println!(
        "{:<12}{:>8}{:>8}",
        "total",
        report.views.series.total(),
        report.clicks.series.total()
    );
    println!(
        "recorded history summed to {} views and {} clicks",
        report.views.historical_sum, report.clicks.historical_sum
    );

    Ok(())
}
