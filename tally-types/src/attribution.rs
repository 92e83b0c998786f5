//! Attribution of a reconciliation to the sources that served it.

use serde::{Deserialize, Serialize};

/// Which registered sources supplied the two halves of a reconciliation.
///
/// Behavior:
/// - Filled in by the orchestrator after each capability resolves.
/// - `None` means the half was not fetched (e.g. the request failed before it).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attribution {
    /// Source that served the historical series.
    pub history: Option<String>,
    /// Source that served the authoritative total.
    pub total: Option<String>,
}

impl Attribution {
    /// Create an attribution naming both sources.
    pub fn new(history: impl Into<String>, total: impl Into<String>) -> Self {
        Self {
            history: Some(history.into()),
            total: Some(total.into()),
        }
    }
}
