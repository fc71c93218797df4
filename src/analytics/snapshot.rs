//! Aggregate ticket metrics for one batch

use crate::analytics::grouped::{Counts, GroupedCounts};
use chrono::Duration;

/// Metrics derived from one batch of ticket events.
///
/// Rebuilt from scratch on every run; nothing carries over between batches.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    /// Every event in the batch, regardless of event type
    pub total_tickets: u64,

    /// Events with severity `High`
    pub high_severity_tickets: u64,

    /// Events with severity `Medium`
    pub medium_severity_tickets: u64,

    /// Events with severity `Low`
    pub low_severity_tickets: u64,

    /// Events with a closed status
    pub closed_tickets: u64,

    /// Events with an open status
    pub open_tickets: u64,

    /// Events whose status is neither closed nor open.
    ///
    /// Published as `duplicate_tickets`.
    pub other_status_tickets: u64,

    /// Partition keys with a Created event but no Updated event
    pub unresponded_tickets: u64,

    /// Sum of `last modified - created` over closed events that were modified
    pub total_close_time: Duration,

    /// `total_close_time / closed_tickets`, zero when nothing was closed
    pub average_close_time: Duration,

    /// Week bucket -> count
    pub weekly_tickets: Counts,

    /// Month bucket -> count
    pub monthly_tickets: Counts,

    /// Week bucket -> issue type -> count
    pub weekly_tickets_by_type: GroupedCounts,

    /// Month bucket -> issue type -> count
    pub monthly_tickets_by_type: GroupedCounts,

    /// Issue type -> count
    pub tickets_by_issue_type: Counts,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            total_tickets: 0,
            high_severity_tickets: 0,
            medium_severity_tickets: 0,
            low_severity_tickets: 0,
            closed_tickets: 0,
            open_tickets: 0,
            other_status_tickets: 0,
            unresponded_tickets: 0,
            total_close_time: Duration::zero(),
            average_close_time: Duration::zero(),
            weekly_tickets: Counts::new(),
            monthly_tickets: Counts::new(),
            weekly_tickets_by_type: GroupedCounts::new(),
            monthly_tickets_by_type: GroupedCounts::new(),
            tickets_by_issue_type: Counts::new(),
        }
    }
}

impl MetricsSnapshot {
    /// Average close time in fractional seconds
    pub fn average_close_seconds(&self) -> f64 {
        duration_seconds(self.average_close_time)
    }

    /// Sum of the three status buckets; always equals `total_tickets`
    pub fn status_total(&self) -> u64 {
        self.open_tickets + self.closed_tickets + self.other_status_tickets
    }
}

pub(crate) fn duration_seconds(duration: Duration) -> f64 {
    match duration.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1_000_000_000.0,
        None => duration.num_milliseconds() as f64 / 1_000.0,
    }
}
