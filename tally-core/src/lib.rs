//! tally-core
//!
//! Core types, traits, and utilities shared across the tally ecosystem.
//!
//! - `types`: common data structures (series points, requests, reports).
//! - `connector`: the `TallyConnector` trait and the source role traits.
//! - `timeseries`: normalization and largest-remainder redistribution.
//! - `aggregate`: filter-and-sum helper for live totals and rates.
//!
//! The redistribution functions are pure and synchronous; they can be called
//! from any thread without coordination. Only the source traits are async.
#![warn(missing_docs)]

/// Filter-and-sum helper for live totals and rates.
pub mod aggregate;
/// Source capability traits and the primary `TallyConnector` interface.
pub mod connector;
/// Time-series utilities for normalization and redistribution.
pub mod timeseries;
pub mod types;

pub use aggregate::{Totals, summarize};
pub use connector::TallyConnector;
pub use timeseries::normalize::{is_strictly_ordered, normalize_daily};
pub use timeseries::redistribute::{apportion, exact_shares, redistribute, redistribute_with};
pub use timeseries::util::{ensure_non_negative_counts, ensure_non_negative_total, historical_sum};
pub use types::*;
