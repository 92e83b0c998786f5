//! Source and metric identifiers usable across crates.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Typed key for identifying registered sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceKey(pub &'static str);

impl SourceKey {
    /// Construct a new typed source key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<SourceKey> for &'static str {
    fn from(k: SourceKey) -> Self {
        k.0
    }
}

/// Name of a counted metric (e.g. `views`, `clicks`).
///
/// Each metric is reconciled on its own; remainders computed for one metric
/// never influence another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricKey(String);

impl MetricKey {
    /// Page or listing views.
    pub const VIEWS: &'static str = "views";
    /// Outbound clicks.
    pub const CLICKS: &'static str = "clicks";

    /// Construct a metric key from any string-like name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The `views` metric.
    #[must_use]
    pub fn views() -> Self {
        Self::new(Self::VIEWS)
    }

    /// The `clicks` metric.
    #[must_use]
    pub fn clicks() -> Self {
        Self::new(Self::CLICKS)
    }

    /// Returns the metric name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MetricKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
