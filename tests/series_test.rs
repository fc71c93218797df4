//! Series construction from aggregated snapshots

mod common;

use chrono::{TimeZone, Utc};
use common::{batch, ticket, CREATED, UPDATED};
use std::collections::{BTreeMap, HashSet};
use ticket_metrics_pusher::analytics::*;
use ticket_metrics_pusher::config::Config;
use ticket_metrics_pusher::ingest::decode_events;

fn series_for(events: Vec<serde_json::Value>) -> Vec<SeriesPoint> {
    let events = decode_events(&batch(events)).unwrap();
    let snapshot = TicketAggregator::aggregate(&events);
    let captured_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    SeriesBuilder::new(Config::default().labels).build(&snapshot, captured_at)
}

fn find<'a>(series: &'a [SeriesPoint], name: &str, labels: &[(&str, &str)]) -> Option<&'a SeriesPoint> {
    series.iter().find(|p| {
        p.name == name && labels.iter().all(|(k, v)| p.label(k) == Some(*v))
    })
}

#[test]
fn test_scalar_points_carry_base_labels() {
    let series = series_for(vec![ticket(
        "2024-03-04T10:00:00Z",
        "High",
        "open",
        "billing",
        None,
        CREATED,
        "A",
    )]);

    let total = find(&series, TOTAL_TICKETS, &[]).unwrap();
    assert_eq!(total.value, 1.0);
    assert_eq!(total.label("product_id"), Some("admiral"));
    assert_eq!(total.label("region"), Some("westeurope"));
    assert_eq!(total.label("provider"), Some("azure"));
    assert_eq!(total.label("env"), Some("dev"));
    assert_eq!(total.label("app"), Some("admiral"));

    assert_eq!(find(&series, TICKETS_BY_SEVERITY, &[("severity", "High")]).unwrap().value, 1.0);
    assert_eq!(find(&series, TICKETS_BY_SEVERITY, &[("severity", "Low")]).unwrap().value, 0.0);
    assert_eq!(find(&series, UNRESPONDED_TICKETS, &[]).unwrap().value, 1.0);
}

#[test]
fn test_one_point_per_table_entry() {
    let series = series_for(vec![
        ticket("2024-03-04T10:00:00Z", "High", "open", "billing", None, CREATED, "A"),
        ticket("2024-03-05T10:00:00Z", "Low", "Closed", "access", Some("2024-03-05T10:30:00Z"), UPDATED, "A"),
        ticket("2024-04-15T10:00:00Z", "Low", "open", "billing", None, CREATED, "B"),
    ]);

    let count = |name: &str| series.iter().filter(|p| p.name == name).count();
    assert_eq!(count(TICKETS_PER_WEEK), 2);
    assert_eq!(count(TICKETS_PER_MONTH), 2);
    assert_eq!(count(TICKETS_BY_ISSUE_TYPE), 2);
    assert_eq!(count(TICKETS_PER_WEEK_BY_ISSUE_TYPE), 3);
    assert_eq!(count(TICKETS_PER_MONTH_BY_ISSUE_TYPE), 3);

    assert_eq!(
        find(&series, TICKETS_PER_WEEK, &[("week", "2024-W10")]).unwrap().value,
        2.0
    );
    assert_eq!(
        find(&series, TICKETS_PER_MONTH_BY_ISSUE_TYPE, &[("month", "2024-03"), ("issue_type", "access")])
            .unwrap()
            .value,
        1.0
    );
    assert!(find(&series, TICKETS_PER_MONTH_BY_ISSUE_TYPE, &[("month", "2024-04"), ("issue_type", "access")]).is_none());
    assert_eq!(find(&series, AVERAGE_CLOSE_TIME_SECONDS, &[]).unwrap().value, 1800.0);
}

#[test]
fn test_label_sets_are_unique_per_metric() {
    let series = series_for(vec![
        ticket("2024-03-04T10:00:00Z", "High", "open", "billing", None, CREATED, "A"),
        ticket("2024-03-04T10:00:00Z", "High", "open", "billing", None, CREATED, "A"),
        ticket("2024-03-11T10:00:00Z", "Medium", "Duplicate", "access", None, UPDATED, "A"),
    ]);

    let mut seen: HashSet<(String, Vec<(String, String)>)> = HashSet::new();
    for point in &series {
        let labels: Vec<_> = point.labels.clone().into_iter().collect();
        assert!(seen.insert((point.name.clone(), labels)), "duplicate series {:?}", point);
    }
}

#[test]
fn test_custom_base_labels() {
    let labels = BTreeMap::from([("env".to_string(), "prod".to_string())]);
    let builder = SeriesBuilder::new(labels);
    let series = builder.build_now(&MetricsSnapshot::default());

    assert!(series.iter().all(|p| p.label("env") == Some("prod")));
    assert!(series.iter().all(|p| p.label("region").is_none()));
}
