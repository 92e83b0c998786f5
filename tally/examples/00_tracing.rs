use std::sync::Arc;

use tally::{DateRange, MetricKey, NaiveDate, ReconcileRequest, Tally};
use tally_mock::MockSource;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Spans are emitted when built with `--features tracing`.
    // Suggested: RUST_LOG=info,tally=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let tally = Tally::builder()
        .with_connector(Arc::new(MockSource::new()))
        .build()?;

    let start = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("invalid start")?;
    let end = NaiveDate::from_ymd_opt(2024, 3, 7).ok_or("invalid end")?;
    let range = DateRange::new(start, end)?;

    // Reconcile (emits fetch and fallback spans)
    let req = ReconcileRequest::try_new("acme", MetricKey::views(), range)?;
    let _ = tally.reconcile(&req).await?;

    // A failing owner shows the per-source warnings
    let req = ReconcileRequest::try_new("FAIL", MetricKey::views(), range)?;
    let _ = tally.reconcile(&req).await;

    Ok(())
}
