use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use tally_core::connector::{HistorySource, TallyConnector, TotalsSource};
use tally_core::{Decimal, HistoryRequest, MetricKey, SeriesPoint, TallyError, TotalRequest, summarize};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};

use fixtures::listings::Listing;

/// Mock source for CI-safe examples. Provides deterministic data from static fixtures.
///
/// Owners:
/// - `acme`: a week of views and clicks (March 2024) with a missing day, and
///   live totals that exceed the recorded history.
/// - `newco`: live totals but no recorded history.
/// - `NEGATIVE`: a short history and a negative live total.
/// - `FAIL`: every call fails; `TIMEOUT`: every call is delayed by 200ms.
pub struct MockSource;

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> TallyError {
        TallyError::not_found(what.to_string())
    }

    async fn maybe_fail_or_timeout(owner: &str, capability: &'static str) -> Result<(), TallyError> {
        match owner {
            "FAIL" => Err(TallyError::source_failed(
                "tally-mock",
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                // Orchestrator may time out depending on config
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Live total derived from the owner's approved listings.
    fn live_total(owner: &str, metric: &MetricKey) -> Option<i64> {
        if owner == "NEGATIVE" {
            return Some(-5);
        }
        let listings = fixtures::listings::by_owner(owner)?;
        let totals = summarize(
            &listings,
            |l: &Listing| l.approved,
            |l: &Listing| Decimal::from(l.views),
            |l: &Listing| Decimal::from(l.clicks),
        );
        match metric.as_str() {
            MetricKey::VIEWS => totals.primary.to_i64(),
            MetricKey::CLICKS => totals.secondary.to_i64(),
            _ => None,
        }
    }
}

#[async_trait]
impl TallyConnector for MockSource {
    fn name(&self) -> &'static str {
        "tally-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports_metric(&self, metric: &MetricKey) -> bool {
        matches!(metric.as_str(), MetricKey::VIEWS | MetricKey::CLICKS)
    }

    fn as_history_source(&self) -> Option<&dyn HistorySource> {
        Some(self as &dyn HistorySource)
    }
    fn as_totals_source(&self) -> Option<&dyn TotalsSource> {
        Some(self as &dyn TotalsSource)
    }
}

#[async_trait]
impl HistorySource for MockSource {
    async fn history(&self, req: &HistoryRequest) -> Result<Vec<SeriesPoint>, TallyError> {
        let owner = req.owner();
        Self::maybe_fail_or_timeout(owner, "history").await?;
        fixtures::history::by_owner(owner, req.metric())
            .ok_or_else(|| Self::not_found(&format!("{} history for {owner}", req.metric())))
    }
}

#[async_trait]
impl TotalsSource for MockSource {
    async fn total(&self, req: &TotalRequest) -> Result<i64, TallyError> {
        let owner = req.owner();
        Self::maybe_fail_or_timeout(owner, "total").await?;
        Self::live_total(owner, req.metric())
            .ok_or_else(|| Self::not_found(&format!("{} total for {owner}", req.metric())))
    }
}
