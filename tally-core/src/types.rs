//! Re-export of foundational types from `tally-types`.
// Consolidated re-exports so downstream crates can depend on `tally-core` only

pub use tally_types::{Capability, TallyError};

pub use tally_types::{MetricKey, SourceKey};
pub use tally_types::{InvalidTotalPolicy, TallyConfig, ZeroHistoryPolicy};
pub use tally_types::{
    Attribution, EngagementPoint, EngagementReport, Outcome, ReconcileReport,
};

pub use tally_types::{AdjustedPoint, RedistributedSeries, SeriesPoint};
pub use tally_types::{DateRange, HistoryRequest, ReconcileRequest, TotalRequest};

pub use tally_types::{Decimal, NaiveDate};
