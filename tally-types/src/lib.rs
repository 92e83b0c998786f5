//! Tally-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod attribution;
mod capability;
mod config;
mod connector;
mod error;
mod reports;
mod requests;
mod series;

pub use attribution::Attribution;
pub use capability::Capability;
pub use config::{InvalidTotalPolicy, TallyConfig, ZeroHistoryPolicy};
pub use connector::{MetricKey, SourceKey};
pub use error::TallyError;
pub use reports::{EngagementPoint, EngagementReport, Outcome, ReconcileReport};
pub use requests::{DateRange, HistoryRequest, ReconcileRequest, TotalRequest};
pub use series::{AdjustedPoint, RedistributedSeries, SeriesPoint};

pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
