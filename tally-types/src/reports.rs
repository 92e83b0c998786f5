//! Report envelopes produced by the orchestrator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::attribution::Attribution;
use crate::connector::MetricKey;
use crate::error::TallyError;
use crate::requests::DateRange;
use crate::series::RedistributedSeries;

/// How the series in a [`ReconcileReport`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The series was rescaled to sum to the authoritative total.
    Reconciled,
    /// The historical series had no weight; the zero-history policy applied.
    NoHistory,
    /// The authoritative total was unusable; the series is the rounded history.
    Unadjusted,
}

/// Result of reconciling one metric for one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Owner the metric belongs to.
    pub owner: String,
    /// Reconciled metric.
    pub metric: MetricKey,
    /// Reporting window.
    pub range: DateRange,
    /// How `series` was produced.
    pub outcome: Outcome,
    /// Per-period adjusted counts in period order.
    pub series: RedistributedSeries,
    /// Sum of the raw historical values.
    pub historical_sum: Decimal,
    /// Total as reported by the totals source (may be negative when `Unadjusted`).
    pub authoritative_total: i64,
    /// Sources that served the request.
    pub attribution: Attribution,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<TallyError>,
}

/// Views and clicks for a single period with the derived click-through rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementPoint {
    /// Period the counts belong to.
    pub period: NaiveDate,
    /// Adjusted views.
    pub views: u64,
    /// Adjusted clicks.
    pub clicks: u64,
    /// `clicks / views`, absent when there were no views.
    pub rate: Option<Decimal>,
}

/// Views and clicks reconciled independently, joined by period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementReport {
    /// Owner the metrics belong to.
    pub owner: String,
    /// Reporting window.
    pub range: DateRange,
    /// Reconciled views.
    pub views: ReconcileReport,
    /// Reconciled clicks.
    pub clicks: ReconcileReport,
    /// Overall `clicks / views` over the reconciled totals.
    pub overall_rate: Option<Decimal>,
    /// Per-period join of both series (periods present in either series).
    pub per_period: Vec<EngagementPoint>,
}
