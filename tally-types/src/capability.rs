use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
///
/// These map one-to-one with orchestrator endpoints and allow consistent
/// Display formatting in error messages and spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Per-period historical counts for a date range.
    History,
    /// Single authoritative live total.
    Total,
    /// Historical series rescaled to the authoritative total.
    Reconcile,
    /// Views and clicks reconciled together with derived rates.
    Engagement,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Total => "total",
            Self::Reconcile => "reconcile",
            Self::Engagement => "engagement",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
