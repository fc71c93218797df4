//! Flattening of a metrics snapshot into labeled time-series points

use crate::analytics::grouped::{Counts, GroupedCounts};
use crate::analytics::snapshot::MetricsSnapshot;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

pub const TOTAL_TICKETS: &str = "total_tickets";
pub const TICKETS_BY_SEVERITY: &str = "tickets_by_severity";
pub const CLOSED_TICKETS: &str = "closed_tickets";
pub const OPEN_TICKETS: &str = "open_tickets";
pub const DUPLICATE_TICKETS: &str = "duplicate_tickets";
pub const AVERAGE_CLOSE_TIME_SECONDS: &str = "average_close_time_seconds";
pub const UNRESPONDED_TICKETS: &str = "unresponded_tickets";
pub const TICKETS_PER_WEEK: &str = "tickets_per_week";
pub const TICKETS_PER_MONTH: &str = "tickets_per_month";
pub const TICKETS_BY_ISSUE_TYPE: &str = "tickets_by_issuetype";
pub const TICKETS_PER_WEEK_BY_ISSUE_TYPE: &str = "tickets_per_week_by_issuetype";
pub const TICKETS_PER_MONTH_BY_ISSUE_TYPE: &str = "tickets_per_month_by_issuetype";

pub const SEVERITY_LABEL: &str = "severity";
pub const WEEK_LABEL: &str = "week";
pub const MONTH_LABEL: &str = "month";
pub const ISSUE_TYPE_LABEL: &str = "issue_type";

/// A single labeled sample destined for the monitoring backend
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub value: f64,
    /// When the snapshot was converted, not when any ticket happened
    pub timestamp: DateTime<Utc>,
}

impl SeriesPoint {
    pub fn new(name: impl Into<String>, value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            labels: BTreeMap::new(),
            value,
            timestamp,
        }
    }

    /// Set a label, replacing any existing value under the same name
    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }
}

/// Builds series points carrying a fixed set of base labels
#[derive(Debug, Clone, Default)]
pub struct SeriesBuilder {
    base_labels: BTreeMap<String, String>,
}

impl SeriesBuilder {
    pub fn new(base_labels: BTreeMap<String, String>) -> Self {
        Self { base_labels }
    }

    /// Build points stamped with the current time
    pub fn build_now(&self, snapshot: &MetricsSnapshot) -> Vec<SeriesPoint> {
        self.build(snapshot, Utc::now())
    }

    /// One point per scalar metric and one per observed table entry.
    ///
    /// Grouped tables are sparse, so no point is produced for a bucket and
    /// issue type combination that never occurred.
    pub fn build(&self, snapshot: &MetricsSnapshot, captured_at: DateTime<Utc>) -> Vec<SeriesPoint> {
        let point = |name: &str, value: f64| {
            let mut point = SeriesPoint::new(name, value, captured_at);
            point.labels = self.base_labels.clone();
            point
        };

        let mut series = vec![
            point(TOTAL_TICKETS, snapshot.total_tickets as f64),
            point(TICKETS_BY_SEVERITY, snapshot.high_severity_tickets as f64)
                .with_label(SEVERITY_LABEL, "High"),
            point(TICKETS_BY_SEVERITY, snapshot.medium_severity_tickets as f64)
                .with_label(SEVERITY_LABEL, "Medium"),
            point(TICKETS_BY_SEVERITY, snapshot.low_severity_tickets as f64)
                .with_label(SEVERITY_LABEL, "Low"),
            point(CLOSED_TICKETS, snapshot.closed_tickets as f64),
            point(OPEN_TICKETS, snapshot.open_tickets as f64),
            point(DUPLICATE_TICKETS, snapshot.other_status_tickets as f64),
            point(AVERAGE_CLOSE_TIME_SECONDS, snapshot.average_close_seconds()),
            point(UNRESPONDED_TICKETS, snapshot.unresponded_tickets as f64),
        ];

        let mut push_counts = |name: &str, label: &str, counts: &Counts| {
            for (key, count) in counts {
                series.push(point(name, *count as f64).with_label(label, key.as_str()));
            }
        };
        push_counts(TICKETS_PER_WEEK, WEEK_LABEL, &snapshot.weekly_tickets);
        push_counts(TICKETS_PER_MONTH, MONTH_LABEL, &snapshot.monthly_tickets);
        push_counts(TICKETS_BY_ISSUE_TYPE, ISSUE_TYPE_LABEL, &snapshot.tickets_by_issue_type);

        let mut push_grouped = |name: &str, label: &str, grouped: &GroupedCounts| {
            for (bucket, issue_type, count) in grouped.iter() {
                series.push(
                    point(name, count as f64)
                        .with_label(label, bucket)
                        .with_label(ISSUE_TYPE_LABEL, issue_type),
                );
            }
        };
        push_grouped(
            TICKETS_PER_WEEK_BY_ISSUE_TYPE,
            WEEK_LABEL,
            &snapshot.weekly_tickets_by_type,
        );
        push_grouped(
            TICKETS_PER_MONTH_BY_ISSUE_TYPE,
            MONTH_LABEL,
            &snapshot.monthly_tickets_by_type,
        );

        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn base_labels() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("app".to_string(), "admiral".to_string()),
            ("env".to_string(), "dev".to_string()),
        ])
    }

    #[test]
    fn test_empty_snapshot_has_only_scalar_points() {
        let builder = SeriesBuilder::new(base_labels());
        let series = builder.build(&MetricsSnapshot::default(), Utc::now());

        assert_eq!(series.len(), 9);
        assert!(series.iter().all(|p| p.value == 0.0));
        assert!(series.iter().all(|p| p.label("app") == Some("admiral")));
    }

    #[test]
    fn test_grouped_points_are_sparse() {
        let mut snapshot = MetricsSnapshot::default();
        snapshot.weekly_tickets_by_type.increment("2024-W10", "billing");
        snapshot.weekly_tickets_by_type.increment("2024-W11", "access");

        let series = SeriesBuilder::new(base_labels()).build(&snapshot, Utc::now());
        let by_type: Vec<_> = series
            .iter()
            .filter(|p| p.name == TICKETS_PER_WEEK_BY_ISSUE_TYPE)
            .collect();

        assert_eq!(by_type.len(), 2);
        assert_eq!(by_type[0].label(WEEK_LABEL), Some("2024-W10"));
        assert_eq!(by_type[0].label(ISSUE_TYPE_LABEL), Some("billing"));
    }

    #[test]
    fn test_points_share_capture_timestamp() {
        let captured_at = Utc::now() - Duration::minutes(5);
        let mut snapshot = MetricsSnapshot::default();
        snapshot.tickets_by_issue_type.insert("billing".to_string(), 4);

        let series = SeriesBuilder::default().build(&snapshot, captured_at);
        assert!(series.iter().all(|p| p.timestamp == captured_at));
    }

    #[test]
    fn test_metric_label_overrides_base_label() {
        let labels = BTreeMap::from([("week".to_string(), "base".to_string())]);
        let mut snapshot = MetricsSnapshot::default();
        snapshot.weekly_tickets.insert("2024-W10".to_string(), 1);

        let series = SeriesBuilder::new(labels).build(&snapshot, Utc::now());
        let weekly = series.iter().find(|p| p.name == TICKETS_PER_WEEK).unwrap();
        assert_eq!(weekly.label(WEEK_LABEL), Some("2024-W10"));
        assert_eq!(weekly.labels.len(), 1);
    }
}
