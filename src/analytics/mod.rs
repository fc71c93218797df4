//! Ticket metrics aggregation and time-series construction
//!
//! A batch of [`TicketEvent`](crate::models::TicketEvent)s is reduced by
//! [`TicketAggregator`] into a [`MetricsSnapshot`], which [`SeriesBuilder`]
//! flattens into labeled [`SeriesPoint`]s ready for publishing.
//!
//! # Example
//!
//! ```no_run
//! use ticket_metrics_pusher::analytics::{SeriesBuilder, TicketAggregator};
//! use ticket_metrics_pusher::ingest::decode_events;
//!
//! let events = decode_events(br#"[{"CreatedDate": "2024-03-04T10:00:00Z"}]"#).unwrap();
//! let snapshot = TicketAggregator::aggregate(&events);
//! let series = SeriesBuilder::default().build_now(&snapshot);
//! assert_eq!(snapshot.total_tickets, 1);
//! assert!(!series.is_empty());
//! ```

mod aggregation;
mod buckets;
mod grouped;
mod series;
mod snapshot;

pub use aggregation::TicketAggregator;
pub use buckets::{month_bucket, week_bucket};
pub use grouped::{Counts, GroupedCounts};
pub use series::*;
pub use snapshot::MetricsSnapshot;
