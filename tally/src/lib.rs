//! Tally reconciles historical per-period counters against live totals.
//!
//! Overview
//! - Dashboards often show a historical breakdown (views per day) that drifts
//!   from the live counter maintained elsewhere. Tally fetches both, rescales
//!   the history so it sums exactly to the live total, and keeps the shape of
//!   the history intact using the largest-remainder method.
//! - Routes requests to sources that implement the `tally_core` contracts.
//! - Normalizes error handling and exposes uniform domain types from `tally_core`.
//!
//! Key behaviors and trade-offs
//! - Source selection: for each capability the first registered source that
//!   supports the metric is tried, with fallback to the next on error or timeout.
//!   Deterministic and economical, at the cost of added latency when the
//!   preferred source is down.
//! - Zero history: by default every period stays at zero so the breakdown never
//!   invents a shape; `ZeroHistoryPolicy::Uniform` spreads the total evenly.
//! - Negative totals: by default the request fails with `InvalidInput`;
//!   `InvalidTotalPolicy::Unadjusted` keeps rendering the rounded history and
//!   records the problem as a warning on the report.
//! - Metrics are independent: views and clicks each keep their own total.
//!
//! Examples
//! Building an orchestrator and reconciling a single metric:
//! ```rust,ignore
//! use std::sync::Arc;
//! use tally::{DateRange, MetricKey, ReconcileRequest, Tally};
//!
//! let tally = Tally::builder()
//!     .with_connector(Arc::new(WarehouseSource::new(pool)))
//!     .with_connector(Arc::new(LiveCounters::new(client)))
//!     .build()?;
//!
//! let range = DateRange::new(start, end)?;
//! let req = ReconcileRequest::try_new("company-42", MetricKey::views(), range)?;
//! let report = tally.reconcile(&req).await?;
//! assert_eq!(report.series.total(), u64::try_from(report.authoritative_total)?);
//! ```
//!
//! Views, clicks and click-through rates in one call:
//! ```rust,ignore
//! let engagement = tally.engagement("company-42", start, end).await?;
//! for p in &engagement.per_period {
//!     println!("{} {} {} {:?}", p.period, p.views, p.clicks, p.rate);
//! }
//! ```
//!
//! See `tally/examples/` for a runnable end-to-end demonstration.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Tally, TallyBuilder};
pub use router::util::{collapse_errors, join_with_deadline};

// Re-export core types for convenience
pub use tally_core::{
    AdjustedPoint, Attribution, Capability, DateRange, Decimal, EngagementPoint,
    EngagementReport, HistoryRequest, InvalidTotalPolicy, MetricKey, NaiveDate, Outcome,
    ReconcileReport, ReconcileRequest, RedistributedSeries, SeriesPoint, SourceKey, TallyConfig,
    TallyConnector, TallyError, TotalRequest, Totals, ZeroHistoryPolicy,
};
