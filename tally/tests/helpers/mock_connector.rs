#![allow(dead_code)]
#![allow(clippy::type_complexity)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_truncation)]

use std::sync::Arc;

use async_trait::async_trait;
use tally::{HistoryRequest, MetricKey, SeriesPoint, TallyConnector, TallyError, TotalRequest};
use tally_core::connector::{HistorySource, TotalsSource};
use tokio::time::{Duration, sleep};

/// Simple in-memory connector used by integration tests.
/// You can tailor behavior (success/fail, supported metrics, delay) via the builder.
pub struct MockConnector {
    pub name: &'static str,
    pub metrics: Option<Vec<MetricKey>>,
    pub delay_ms: u64,
    pub history_fn:
        Option<Arc<dyn Fn(&HistoryRequest) -> Result<Vec<SeriesPoint>, TallyError> + Send + Sync>>,
    pub total_fn: Option<Arc<dyn Fn(&TotalRequest) -> Result<i64, TallyError> + Send + Sync>>,
}

#[async_trait]
impl HistorySource for MockConnector {
    async fn history(&self, req: &HistoryRequest) -> Result<Vec<SeriesPoint>, TallyError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match &self.history_fn {
            Some(f) => (f)(req),
            None => Err(TallyError::unsupported("history")),
        }
    }
}

#[async_trait]
impl TotalsSource for MockConnector {
    async fn total(&self, req: &TotalRequest) -> Result<i64, TallyError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match &self.total_fn {
            Some(f) => (f)(req),
            None => Err(TallyError::unsupported("total")),
        }
    }
}

impl TallyConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports_metric(&self, metric: &MetricKey) -> bool {
        self.metrics.as_ref().is_none_or(|ms| ms.contains(metric))
    }

    fn as_history_source(&self) -> Option<&dyn HistorySource> {
        if self.history_fn.is_some() {
            Some(self as &dyn HistorySource)
        } else {
            None
        }
    }

    fn as_totals_source(&self) -> Option<&dyn TotalsSource> {
        if self.total_fn.is_some() {
            Some(self as &dyn TotalsSource)
        } else {
            None
        }
    }
}

/* ---------- Tiny builder helpers used by tests ---------- */

impl MockConnector {
    pub fn builder() -> MockConnectorBuilder {
        MockConnectorBuilder::new()
    }
}

pub struct MockConnectorBuilder {
    name: &'static str,
    metrics: Option<Vec<MetricKey>>,
    delay_ms: u64,
    history_fn:
        Option<Arc<dyn Fn(&HistoryRequest) -> Result<Vec<SeriesPoint>, TallyError> + Send + Sync>>,
    total_fn: Option<Arc<dyn Fn(&TotalRequest) -> Result<i64, TallyError> + Send + Sync>>,
}

impl MockConnectorBuilder {
    pub fn new() -> Self {
        Self {
            name: "mock",
            metrics: None,
            delay_ms: 0,
            history_fn: None,
            total_fn: None,
        }
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
    pub fn supports_metric(mut self, metric: MetricKey) -> Self {
        self.metrics.get_or_insert_with(Vec::new).push(metric);
        self
    }
    pub fn delay(mut self, d: Duration) -> Self {
        self.delay_ms = d.as_millis() as u64;
        self
    }

    // History
    pub fn with_history_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&HistoryRequest) -> Result<Vec<SeriesPoint>, TallyError> + Send + Sync + 'static,
    {
        self.history_fn = Some(Arc::new(f));
        self
    }
    pub fn returns_history_ok(mut self, points: Vec<SeriesPoint>) -> Self {
        self.history_fn = Some(Arc::new(move |_r| Ok(points.clone())));
        self
    }
    pub fn history_fails(mut self, err: TallyError) -> Self {
        self.history_fn = Some(Arc::new(move |_r| Err(err.clone())));
        self
    }

    // Totals
    pub fn with_total_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&TotalRequest) -> Result<i64, TallyError> + Send + Sync + 'static,
    {
        self.total_fn = Some(Arc::new(f));
        self
    }
    pub fn returns_total_ok(mut self, total: i64) -> Self {
        self.total_fn = Some(Arc::new(move |_r| Ok(total)));
        self
    }
    pub fn total_fails(mut self, err: TallyError) -> Self {
        self.total_fn = Some(Arc::new(move |_r| Err(err.clone())));
        self
    }

    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(MockConnector {
            name: self.name,
            metrics: self.metrics,
            delay_ms: self.delay_ms,
            history_fn: self.history_fn,
            total_fn: self.total_fn,
        })
    }
}

/// Convenience constructor for a source serving both roles for every metric.
pub fn m_both(name: &'static str, raw: &[u64], total: i64) -> Arc<MockConnector> {
    MockConnector::builder()
        .name(name)
        .returns_history_ok(crate::helpers::points(raw))
        .returns_total_ok(total)
        .build()
}

/// Convenience constructor for a history-only source.
pub fn m_hist(name: &'static str, raw: &[u64]) -> Arc<MockConnector> {
    MockConnector::builder()
        .name(name)
        .returns_history_ok(crate::helpers::points(raw))
        .build()
}

/// Convenience constructor for a totals-only source.
pub fn m_total(name: &'static str, total: i64) -> Arc<MockConnector> {
    MockConnector::builder()
        .name(name)
        .returns_total_ok(total)
        .build()
}
