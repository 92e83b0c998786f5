use std::sync::Arc;
use std::time::Duration;

use tally_core::{
    Capability, InvalidTotalPolicy, MetricKey, TallyConfig, TallyConnector, TallyError,
    ZeroHistoryPolicy,
};

use crate::router::util::collapse_errors;

/// Orchestrator that reconciles historical series against live totals using
/// the registered sources.
pub struct Tally {
    pub(crate) connectors: Vec<Arc<dyn TallyConnector>>,
    pub(crate) cfg: TallyConfig,
}

/// Builder for constructing a `Tally` orchestrator with custom configuration.
pub struct TallyBuilder {
    connectors: Vec<Arc<dyn TallyConnector>>,
    cfg: TallyConfig,
}

impl Default for TallyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TallyBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no sources; you must register at least one via [`with_connector`].
    /// - Defaults follow the documented semantics: zero histories stay zero,
    ///   negative totals fail, 5s per-source timeout, no overall deadline.
    ///
    /// [`with_connector`]: Self::with_connector
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: TallyConfig::default(),
        }
    }

    /// Register a source.
    ///
    /// Behavior and trade-offs:
    /// - Registration order is the priority order: for each capability the first
    ///   source that supports the metric is tried first, later ones are fallbacks.
    /// - A single source may serve history, totals, or both.
    /// - Duplicates are not deduplicated; avoid registering the same source twice.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn TallyConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration at once (e.g. one loaded from a file).
    #[must_use]
    pub fn config(mut self, cfg: TallyConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Select how a history with no weight is distributed.
    ///
    /// Behavior and trade-offs:
    /// - `Zeros` keeps every period at zero; the per-period view then no longer
    ///   sums to the authoritative total.
    /// - `Uniform` spreads the total evenly, inventing a flat shape the history
    ///   never showed.
    #[must_use]
    pub const fn zero_history(mut self, policy: ZeroHistoryPolicy) -> Self {
        self.cfg.zero_history = policy;
        self
    }

    /// Select what happens when a totals source reports a negative total.
    ///
    /// Behavior and trade-offs:
    /// - `Fail` surfaces the upstream bug to the caller as `InvalidInput`.
    /// - `Unadjusted` keeps dashboards rendering the recorded history and
    ///   carries the error as a report warning.
    #[must_use]
    pub const fn invalid_total(mut self, policy: InvalidTotalPolicy) -> Self {
        self.cfg.invalid_total = policy;
        self
    }

    /// Set the per-source request timeout.
    #[must_use]
    pub const fn source_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.source_timeout = timeout;
        self
    }

    /// Set an overall deadline for one reconciliation (history and total together).
    ///
    /// When exceeded, returns a `RequestTimeout` error for the capability.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the `Tally` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidInput` if no sources have been registered via
    /// [`with_connector`](Self::with_connector) or the source timeout is zero.
    pub fn build(self) -> Result<Tally, TallyError> {
        if self.connectors.is_empty() {
            return Err(TallyError::invalid_input(
                "no sources registered; add at least one via with_connector(...)",
            ));
        }
        if self.cfg.source_timeout.is_zero() {
            return Err(TallyError::invalid_input("source timeout must be non-zero"));
        }

        Ok(Tally {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

pub fn tag_err(source_name: &str, e: TallyError) -> TallyError {
    match e {
        e @ (TallyError::NotFound { .. }
        | TallyError::SourceTimeout { .. }
        | TallyError::Source { .. }
        | TallyError::RequestTimeout { .. }
        | TallyError::AllSourcesTimedOut { .. }
        | TallyError::AllSourcesFailed(_)) => e,
        other => TallyError::Source {
            source_name: source_name.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Bound a future by an optional deadline, mapping expiry to `RequestTimeout`.
pub(crate) async fn with_request_deadline<F, T>(
    deadline: Option<Duration>,
    capability: Capability,
    fut: F,
) -> Result<T, TallyError>
where
    F: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| TallyError::request_timeout(capability.to_string())),
        None => Ok(fut.await),
    }
}

impl Tally {
    /// Wrap a source future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tally::core::source_call_with_timeout",
            skip(fut, capability),
            fields(
                source = source_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn source_call_with_timeout<T, Fut>(
        source_name: &'static str,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, TallyError>
    where
        Fut: core::future::Future<Output = Result<T, TallyError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(TallyError::source_timeout(
                source_name,
                capability.to_string(),
            ))
        })
    }

    /// Start building a new `Tally` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let tally = tally::Tally::builder()
    ///     .with_connector(Arc::new(WarehouseSource::new(pool)))
    ///     .with_connector(Arc::new(LiveCounters::new(client)))
    ///     .invalid_total(tally::InvalidTotalPolicy::Unadjusted)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TallyBuilder {
        TallyBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TallyConfig {
        &self.cfg
    }

    /// Registered sources that claim the metric, in priority order.
    pub(crate) fn eligible(&self, metric: &MetricKey) -> Vec<Arc<dyn TallyConnector>> {
        self.connectors
            .iter()
            .filter(|c| c.supports_metric(metric))
            .cloned()
            .collect()
    }

    /// Try eligible sources in priority order until one succeeds.
    ///
    /// - `call` returns `None` for sources lacking the capability; they are skipped.
    /// - Each attempt is bounded by the per-source timeout.
    /// - On success returns the serving source name alongside the value.
    /// - On failure errors are collapsed (see [`collapse_errors`]).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tally::core::fetch_first",
            skip(self, call, metric, capability),
            fields(metric = %metric, capability = %capability),
        )
    )]
    pub(crate) async fn fetch_first<T, F, Fut>(
        &self,
        metric: &MetricKey,
        capability: Capability,
        not_found_what: String,
        call: F,
    ) -> Result<(&'static str, T), TallyError>
    where
        F: Fn(Arc<dyn TallyConnector>) -> Option<Fut>,
        Fut: core::future::Future<Output = Result<T, TallyError>>,
    {
        let mut attempted_any = false;
        let mut errors: Vec<TallyError> = Vec::new();

        for c in self.eligible(metric) {
            let Some(fut) = call(c.clone()) else {
                continue;
            };
            attempted_any = true;
            match Self::source_call_with_timeout(c.name(), capability, self.cfg.source_timeout, fut)
                .await
            {
                Ok(v) => return Ok((c.name(), v)),
                Err(e @ (TallyError::NotFound { .. } | TallyError::SourceTimeout { .. })) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(source = c.name(), error = %e, "source miss; trying next");
                    errors.push(e);
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(source = c.name(), error = %e, "source failed; trying next");
                    errors.push(tag_err(c.name(), e));
                }
            }
        }

        Err(collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(not_found_what),
        ))
    }
}
