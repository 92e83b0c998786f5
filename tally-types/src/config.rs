//! Configuration types shared across orchestrators and sources.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What to do when the historical series sums to zero but the caller still
/// supplies an authoritative total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZeroHistoryPolicy {
    /// Every period is adjusted to zero; the authoritative total is not spread.
    #[default]
    Zeros,
    /// Spread the authoritative total evenly across all periods, handing the
    /// leftover units to the earliest periods.
    Uniform,
}

/// What the orchestrator does when a totals source reports a negative total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvalidTotalPolicy {
    /// Propagate the `InvalidInput` error to the caller.
    #[default]
    Fail,
    /// Return the historical series unadjusted (rounded to whole counts) and
    /// record the error as a report warning.
    Unadjusted,
}

/// Global configuration for the `Tally` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyConfig {
    /// Behavior when the historical series has no weight to follow.
    pub zero_history: ZeroHistoryPolicy,
    /// Behavior when the authoritative total is negative.
    pub invalid_total: InvalidTotalPolicy,
    /// Timeout for individual source requests.
    pub source_timeout: Duration,
    /// Optional overall deadline for one reconciliation (both fetches together).
    pub request_timeout: Option<Duration>,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            zero_history: ZeroHistoryPolicy::Zeros,
            invalid_total: InvalidTotalPolicy::Fail,
            source_timeout: Duration::from_secs(5),
            request_timeout: None,
        }
    }
}
