use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::ToPrimitive;
use tally_core::{
    AdjustedPoint, Attribution, Capability, DateRange, HistoryRequest, InvalidTotalPolicy, MetricKey,
    NaiveDate, Outcome, ReconcileReport, ReconcileRequest, RedistributedSeries, SeriesPoint,
    TallyError, TotalRequest, historical_sum, normalize_daily, redistribute_with,
};

use crate::Tally;
use crate::core::with_request_deadline;

impl Tally {
    /// Reconcile one metric: rescale its recorded history onto the live total.
    ///
    /// Behavior and trade-offs:
    /// - History and total are fetched concurrently, each from the first eligible
    ///   source in registration order with fallback to the next on failure.
    /// - The history is normalized to one point per day of the requested range
    ///   before redistribution, so sources may return gaps or duplicate days.
    /// - A zero-weight history follows the configured `ZeroHistoryPolicy` and is
    ///   reported with `Outcome::NoHistory`.
    /// - A negative total follows the configured `InvalidTotalPolicy`.
    ///
    /// # Errors
    /// - Source failures collapse per capability (`Unsupported`, `NotFound`,
    ///   `AllSourcesTimedOut`, `AllSourcesFailed`).
    /// - `RequestTimeout` when the overall deadline elapses.
    /// - `InvalidInput` for a negative total under `InvalidTotalPolicy::Fail`.
    /// - `Data` when a source returns negative counts.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tally::router",
            skip(self, req),
            fields(owner = %req.owner(), metric = %req.metric()),
        )
    )]
    pub async fn reconcile(&self, req: &ReconcileRequest) -> Result<ReconcileReport, TallyError> {
        let total_req = req.total_request();
        let fut = async {
            let (history, total) = tokio::join!(
                self.fetch_history(req.history_request()),
                self.fetch_total(&total_req),
            );
            let (history_source, points) = history?;
            let (total_source, total) = total?;
            self.build_report(
                req,
                points,
                total,
                Attribution::new(history_source, total_source),
            )
        };
        with_request_deadline(self.cfg.request_timeout, Capability::Reconcile, fut).await?
    }

    /// Reconcile several metrics of one owner over the same window.
    ///
    /// Metrics are reconciled concurrently and independently: one metric
    /// failing never affects the others. Results are returned in input order.
    /// An invalid window yields an `InvalidInput` error for every metric.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tally::router",
            skip(self, metrics),
            fields(count = metrics.len()),
        )
    )]
    pub async fn reconcile_many(
        &self,
        owner: &str,
        start: NaiveDate,
        end: NaiveDate,
        metrics: &[MetricKey],
    ) -> Vec<Result<ReconcileReport, TallyError>> {
        let tasks = metrics.iter().map(|metric| async move {
            let range = DateRange::new(start, end)?;
            let req = ReconcileRequest::try_new(owner, metric.clone(), range)?;
            self.reconcile(&req).await
        });
        futures::future::join_all(tasks).await
    }

    pub(crate) async fn fetch_history(
        &self,
        req: &HistoryRequest,
    ) -> Result<(&'static str, Vec<SeriesPoint>), TallyError> {
        let what = format!("{} history for {}", req.metric(), req.owner());
        self.fetch_first(req.metric(), Capability::History, what, |c| {
            if c.as_history_source().is_none() {
                return None;
            }
            let req = req.clone();
            Some(async move {
                match c.as_history_source() {
                    Some(p) => p.history(&req).await,
                    None => Err(TallyError::source_failed(
                        c.name(),
                        "missing history capability during call",
                    )),
                }
            })
        })
        .await
    }

    pub(crate) async fn fetch_total(
        &self,
        req: &TotalRequest,
    ) -> Result<(&'static str, i64), TallyError> {
        let what = format!("{} total for {}", req.metric(), req.owner());
        self.fetch_first(req.metric(), Capability::Total, what, |c| {
            if c.as_totals_source().is_none() {
                return None;
            }
            let req = req.clone();
            Some(async move {
                match c.as_totals_source() {
                    Some(p) => p.total(&req).await,
                    None => Err(TallyError::source_failed(
                        c.name(),
                        "missing totals capability during call",
                    )),
                }
            })
        })
        .await
    }

    fn build_report(
        &self,
        req: &ReconcileRequest,
        points: Vec<SeriesPoint>,
        total: i64,
        attribution: Attribution,
    ) -> Result<ReconcileReport, TallyError> {
        let series = normalize_daily(points, req.range())?;
        let sum = historical_sum(&series)?;
        let mut warnings = Vec::new();

        let (outcome, adjusted) = match redistribute_with(&series, total, self.cfg.zero_history) {
            Ok(adjusted) if sum.is_zero() => (Outcome::NoHistory, adjusted),
            Ok(adjusted) => (Outcome::Reconciled, adjusted),
            Err(e) if total < 0 && self.cfg.invalid_total == InvalidTotalPolicy::Unadjusted => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "tally::router",
                    owner = req.owner(),
                    metric = %req.metric(),
                    total,
                    error = %e,
                    "unusable total; returning unadjusted history"
                );
                warnings.push(e);
                (Outcome::Unadjusted, unadjusted(&series))
            }
            Err(e) => return Err(e),
        };

        Ok(ReconcileReport {
            owner: req.owner().to_string(),
            metric: req.metric().clone(),
            range: req.range(),
            outcome,
            series: adjusted,
            historical_sum: sum,
            authoritative_total: total,
            attribution,
            warnings,
        })
    }
}

// Raw counts rounded half away from zero; used when no valid total exists.
fn unadjusted(series: &[SeriesPoint]) -> RedistributedSeries {
    let points = series
        .iter()
        .map(|p| AdjustedPoint {
            period: p.period,
            raw: p.raw,
            adjusted: p
                .raw
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u64()
                .unwrap_or_default(),
        })
        .collect();
    RedistributedSeries::new(points)
}
