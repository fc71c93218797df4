//! Reduction of a ticket-event batch into a metrics snapshot

use crate::analytics::buckets::{month_bucket, week_bucket};
use crate::analytics::snapshot::MetricsSnapshot;
use crate::models::{EventKind, Severity, TicketEvent, TicketStatus};
use chrono::Duration;
use std::collections::HashSet;

/// Aggregator for ticket event batches
pub struct TicketAggregator;

impl TicketAggregator {
    /// Aggregate a batch of ticket events.
    ///
    /// Every event counts toward the totals and breakdowns whatever its event
    /// type. An empty batch yields an all-zero snapshot.
    pub fn aggregate(events: &[TicketEvent]) -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot {
            unresponded_tickets: Self::unresponded_count(events),
            ..MetricsSnapshot::default()
        };

        for event in events {
            Self::accumulate(&mut snapshot, event);
        }

        snapshot.average_close_time =
            average_duration(snapshot.total_close_time, snapshot.closed_tickets);

        snapshot
    }

    /// Number of partition keys seen on a Created event but never on an
    /// Updated event.
    ///
    /// Repeated events for the same key collapse into one set entry, so the
    /// result does not depend on event order or multiplicity.
    pub fn unresponded_count(events: &[TicketEvent]) -> u64 {
        let mut created: HashSet<&str> = HashSet::new();
        let mut updated: HashSet<&str> = HashSet::new();

        for event in events {
            match event.event_type {
                EventKind::Created => {
                    created.insert(event.partition_key.as_str());
                }
                EventKind::Updated => {
                    updated.insert(event.partition_key.as_str());
                }
                EventKind::Other(_) => {}
            }
        }

        created.difference(&updated).count() as u64
    }

    fn accumulate(snapshot: &mut MetricsSnapshot, event: &TicketEvent) {
        snapshot.total_tickets += 1;

        let week = week_bucket(&event.created_date);
        let month = month_bucket(&event.created_date);
        let issue_type = event.issue_type_id.as_str();

        *snapshot.weekly_tickets.entry(week.clone()).or_insert(0) += 1;
        *snapshot.monthly_tickets.entry(month.clone()).or_insert(0) += 1;
        snapshot.weekly_tickets_by_type.increment(&week, issue_type);
        snapshot.monthly_tickets_by_type.increment(&month, issue_type);

        match event.severity {
            Severity::High => snapshot.high_severity_tickets += 1,
            Severity::Medium => snapshot.medium_severity_tickets += 1,
            Severity::Low => snapshot.low_severity_tickets += 1,
            Severity::Other(_) => {}
        }

        match event.status {
            TicketStatus::Closed => {
                snapshot.closed_tickets += 1;
                if let Some(close_time) = event.close_duration() {
                    snapshot.total_close_time =
                        saturating_add(snapshot.total_close_time, close_time);
                }
            }
            TicketStatus::Open => snapshot.open_tickets += 1,
            TicketStatus::Other(_) => snapshot.other_status_tickets += 1,
        }

        *snapshot
            .tickets_by_issue_type
            .entry(issue_type.to_string())
            .or_insert(0) += 1;
    }
}

/// Sum that clamps at the representable range instead of panicking.
fn saturating_add(total: Duration, delta: Duration) -> Duration {
    total.checked_add(&delta).unwrap_or(if delta < Duration::zero() {
        Duration::MIN
    } else {
        Duration::MAX
    })
}

fn average_duration(total: Duration, count: u64) -> Duration {
    if count == 0 {
        return Duration::zero();
    }

    let count = count as i64;
    match total.num_nanoseconds() {
        Some(nanos) => Duration::nanoseconds(nanos / count),
        None => Duration::milliseconds(total.num_milliseconds() / count),
    }
}
