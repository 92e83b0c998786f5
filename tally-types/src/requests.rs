//! Validated request types passed explicitly to sources and the orchestrator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::connector::MetricKey;
use crate::error::TallyError;

/// Inclusive range of calendar days `[start..=end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeRaw")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    ///
    /// # Errors
    /// Returns `InvalidInput` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TallyError> {
        if start > end {
            return Err(TallyError::invalid_input(format!(
                "date range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `day` falls inside the range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of days covered, counting both ends.
    #[must_use]
    pub fn num_days(&self) -> u64 {
        u64::try_from((self.end - self.start).num_days()).unwrap_or(0) + 1
    }

    /// Iterate each day of the range in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

#[derive(Deserialize)]
struct DateRangeRaw {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<DateRangeRaw> for DateRange {
    type Error = TallyError;

    fn try_from(raw: DateRangeRaw) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

fn require_owner(owner: String) -> Result<String, TallyError> {
    if owner.trim().is_empty() {
        return Err(TallyError::invalid_input("owner identifier must not be empty"));
    }
    Ok(owner)
}

/// Request for per-period historical counts of one metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HistoryRequestRaw")]
pub struct HistoryRequest {
    owner: String,
    metric: MetricKey,
    range: DateRange,
}

// Deserialization goes through the same owner check as `try_new`.
#[derive(Deserialize)]
struct HistoryRequestRaw {
    owner: String,
    metric: MetricKey,
    range: DateRange,
}

impl TryFrom<HistoryRequestRaw> for HistoryRequest {
    type Error = TallyError;

    fn try_from(raw: HistoryRequestRaw) -> Result<Self, Self::Error> {
        Self::try_new(raw.owner, raw.metric, raw.range)
    }
}

impl HistoryRequest {
    /// Build a history request for an owner (company, organizer, ...).
    ///
    /// # Errors
    /// Returns `InvalidInput` when `owner` is blank.
    pub fn try_new(
        owner: impl Into<String>,
        metric: MetricKey,
        range: DateRange,
    ) -> Result<Self, TallyError> {
        Ok(Self {
            owner: require_owner(owner.into())?,
            metric,
            range,
        })
    }

    /// Owner identifier.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Requested metric.
    #[must_use]
    pub const fn metric(&self) -> &MetricKey {
        &self.metric
    }

    /// Requested date range.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }
}

/// Request for the live authoritative total of one metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TotalRequestRaw")]
pub struct TotalRequest {
    owner: String,
    metric: MetricKey,
}

#[derive(Deserialize)]
struct TotalRequestRaw {
    owner: String,
    metric: MetricKey,
}

impl TryFrom<TotalRequestRaw> for TotalRequest {
    type Error = TallyError;

    fn try_from(raw: TotalRequestRaw) -> Result<Self, Self::Error> {
        Self::try_new(raw.owner, raw.metric)
    }
}

impl TotalRequest {
    /// Build a totals request.
    ///
    /// # Errors
    /// Returns `InvalidInput` when `owner` is blank.
    pub fn try_new(owner: impl Into<String>, metric: MetricKey) -> Result<Self, TallyError> {
        Ok(Self {
            owner: require_owner(owner.into())?,
            metric,
        })
    }

    /// Owner identifier.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Requested metric.
    #[must_use]
    pub const fn metric(&self) -> &MetricKey {
        &self.metric
    }
}

/// Request to reconcile one metric's history against its live total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileRequest {
    history: HistoryRequest,
}

impl ReconcileRequest {
    /// Build a reconcile request.
    ///
    /// # Errors
    /// Returns `InvalidInput` when `owner` is blank.
    pub fn try_new(
        owner: impl Into<String>,
        metric: MetricKey,
        range: DateRange,
    ) -> Result<Self, TallyError> {
        Ok(Self {
            history: HistoryRequest::try_new(owner, metric, range)?,
        })
    }

    /// Owner identifier.
    #[must_use]
    pub fn owner(&self) -> &str {
        self.history.owner()
    }

    /// Metric being reconciled.
    #[must_use]
    pub const fn metric(&self) -> &MetricKey {
        self.history.metric()
    }

    /// Reporting window.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.history.range()
    }

    /// The history half of this request.
    #[must_use]
    pub const fn history_request(&self) -> &HistoryRequest {
        &self.history
    }

    /// The totals half of this request.
    #[must_use]
    pub fn total_request(&self) -> TotalRequest {
        TotalRequest {
            owner: self.history.owner.clone(),
            metric: self.history.metric.clone(),
        }
    }
}
