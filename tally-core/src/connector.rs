use async_trait::async_trait;

use crate::{HistoryRequest, MetricKey, SeriesPoint, TallyError, TotalRequest};
pub use tally_types::SourceKey;

/// Focused role trait for sources that serve per-period historical counts.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Fetch the recorded per-period values of one metric for an owner and range.
    ///
    /// Implementations may return points in any order, with gaps or duplicate
    /// days; the orchestrator normalizes them before reconciling.
    async fn history(&self, req: &HistoryRequest) -> Result<Vec<SeriesPoint>, TallyError>;
}

/// Focused role trait for sources that serve live authoritative totals.
#[async_trait]
pub trait TotalsSource: Send + Sync {
    /// Fetch the current authoritative total of one metric for an owner.
    ///
    /// The value is signed so that upstream bugs producing negative totals are
    /// surfaced as `InvalidInput` by the reconciler rather than wrapped silently.
    async fn total(&self, req: &TotalRequest) -> Result<i64, TallyError>;
}

/// A registered data source advertising which roles it can play.
#[async_trait]
pub trait TallyConnector: Send + Sync {
    /// A stable identifier used in attribution and error messages.
    fn name(&self) -> &'static str;

    /// Canonical source key constructed from the static name.
    fn key(&self) -> SourceKey {
        SourceKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this source *claims* to carry the given metric.
    ///
    /// Default: every metric. Sources that only track some counters should
    /// override this so the orchestrator skips them.
    fn supports_metric(&self, metric: &MetricKey) -> bool {
        let _ = metric;
        true
    }

    /// Advertise history capability by returning a usable trait object reference when supported.
    fn as_history_source(&self) -> Option<&dyn HistorySource> {
        None
    }

    /// Advertise totals capability by returning a usable trait object reference when supported.
    fn as_totals_source(&self) -> Option<&dyn TotalsSource> {
        None
    }
}
