use std::collections::BTreeMap;

use tally_core::{
    Capability, DateRange, Decimal, EngagementPoint, EngagementReport, MetricKey, NaiveDate,
    ReconcileRequest, RedistributedSeries, TallyError, Totals, summarize,
};

use crate::Tally;
use crate::core::with_request_deadline;

impl Tally {
    /// Reconcile views and clicks for an owner and derive click-through rates.
    ///
    /// Both metrics are reconciled concurrently and independently; each keeps
    /// its own authoritative total. Rates are computed on the adjusted counts,
    /// so the overall rate equals `clicks total / views total`.
    ///
    /// The request timeout, when set, bounds the pair as a whole and reports
    /// expiry as `RequestTimeout` for the `engagement` capability.
    ///
    /// # Errors
    /// Returns `InvalidInput` for a blank owner or inverted window, and the
    /// first error of either reconciliation otherwise (views first).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "tally::router", skip(self))
    )]
    pub async fn engagement(
        &self,
        owner: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<EngagementReport, TallyError> {
        let range = DateRange::new(start, end)?;
        let views_req = ReconcileRequest::try_new(owner, MetricKey::views(), range)?;
        let clicks_req = ReconcileRequest::try_new(owner, MetricKey::clicks(), range)?;

        let (views, clicks) = with_request_deadline(
            self.cfg.request_timeout,
            Capability::Engagement,
            async { tokio::join!(self.reconcile(&views_req), self.reconcile(&clicks_req)) },
        )
        .await?;
        let (views, clicks) = (views?, clicks?);

        let per_period = join_by_period(&views.series, &clicks.series);
        let overall = summarize(
            &per_period,
            |_: &EngagementPoint| true,
            |p: &EngagementPoint| Decimal::from(p.views),
            |p: &EngagementPoint| Decimal::from(p.clicks),
        );

        Ok(EngagementReport {
            owner: owner.to_string(),
            range,
            views,
            clicks,
            overall_rate: overall.rate(),
            per_period,
        })
    }
}

fn join_by_period(views: &RedistributedSeries, clicks: &RedistributedSeries) -> Vec<EngagementPoint> {
    let mut by_day: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for p in views {
        by_day.entry(p.period).or_default().0 += p.adjusted;
    }
    for p in clicks {
        by_day.entry(p.period).or_default().1 += p.adjusted;
    }

    by_day
        .into_iter()
        .map(|(period, (views, clicks))| EngagementPoint {
            period,
            views,
            clicks,
            rate: Totals {
                primary: Decimal::from(views),
                secondary: Decimal::from(clicks),
                count: 1,
            }
            .rate(),
        })
        .collect()
}
