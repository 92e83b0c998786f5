use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tally_core::connector::{HistorySource, TallyConnector, TotalsSource};
use tally_core::{Capability, HistoryRequest, MetricKey, SeriesPoint, TallyError, TotalRequest};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(TallyError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

type RuleKey = (String, MetricKey);

#[derive(Default)]
struct InternalState {
    history_rules: HashMap<RuleKey, MockBehavior<Vec<SeriesPoint>>>,
    total_rules: HashMap<RuleKey, MockBehavior<i64>>,
    requests: Vec<(Capability, String, MetricKey)>,
}

impl InternalState {
    fn log(&mut self, capability: Capability, owner: &str, metric: &MetricKey) -> RuleKey {
        self.requests
            .push((capability, owner.to_string(), metric.clone()));
        (owner.to_string(), metric.clone())
    }
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `history` calls for an owner and metric.
    pub async fn set_history_behavior(
        &self,
        owner: &str,
        metric: MetricKey,
        behavior: MockBehavior<Vec<SeriesPoint>>,
    ) {
        let mut guard = self.state.lock().await;
        guard
            .history_rules
            .insert((owner.to_string(), metric), behavior);
    }

    /// Set the behavior for `total` calls for an owner and metric.
    pub async fn set_total_behavior(
        &self,
        owner: &str,
        metric: MetricKey,
        behavior: MockBehavior<i64>,
    ) {
        let mut guard = self.state.lock().await;
        guard.total_rules.insert((owner.to_string(), metric), behavior);
    }

    /// Return a copy of the request log, in call order.
    pub async fn requests(&self) -> Vec<(Capability, String, MetricKey)> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.history_rules.clear();
        guard.total_rules.clear();
        guard.requests.clear();
    }
}

/// A source that defers all behavior to an external controller.
///
/// Calls without a configured rule fail with `Unsupported`, so the orchestrator
/// treats them like any other source error and falls back.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn TallyConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn TallyConnector>, controller)
    }
}

async fn resolve<T>(behavior: Option<MockBehavior<T>>, capability: Capability) -> Result<T, TallyError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => std::future::pending().await,
        None => Err(TallyError::unsupported(capability.to_string())),
    }
}

#[async_trait]
impl TallyConnector for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_history_source(&self) -> Option<&dyn HistorySource> {
        Some(self as &dyn HistorySource)
    }

    fn as_totals_source(&self) -> Option<&dyn TotalsSource> {
        Some(self as &dyn TotalsSource)
    }
}

#[async_trait]
impl HistorySource for DynamicMockSource {
    async fn history(&self, req: &HistoryRequest) -> Result<Vec<SeriesPoint>, TallyError> {
        // Snapshot the rule without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            let key = guard.log(Capability::History, req.owner(), req.metric());
            guard.history_rules.get(&key).cloned()
        };
        resolve(behavior, Capability::History).await
    }
}

#[async_trait]
impl TotalsSource for DynamicMockSource {
    async fn total(&self, req: &TotalRequest) -> Result<i64, TallyError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            let key = guard.log(Capability::Total, req.owner(), req.metric());
            guard.total_rules.get(&key).cloned()
        };
        resolve(behavior, Capability::Total).await
    }
}
