//! One batch run: load, decode, aggregate, build series, publish

use crate::analytics::{MetricsSnapshot, SeriesBuilder, SeriesPoint, TicketAggregator};
use crate::config::{Config, PublisherConfig};
use crate::error::{AppError, Result};
use crate::ingest::{decode_events, read_source};
use crate::metrics::{EVENTS_DECODED_TOTAL, SERIES_BUILT};
use crate::publish::{LogPublisher, PublishOutcome, RemoteWritePublisher, SeriesPublisher};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

/// Metrics computed from one input batch, ready to publish
#[derive(Debug, Clone)]
pub struct PreparedBatch {
    pub events: usize,
    pub snapshot: MetricsSnapshot,
    pub series: Vec<SeriesPoint>,
}

/// Result of a complete run
#[derive(Debug)]
pub struct RunReport {
    pub batch: PreparedBatch,
    /// Delivery failures are reported here rather than aborting the run
    pub publish: Result<PublishOutcome>,
}

impl RunReport {
    pub fn published(&self) -> bool {
        self.publish.is_ok()
    }
}

/// Decode, aggregate and flatten one batch of raw input bytes.
pub fn prepare_batch(
    bytes: &[u8],
    builder: &SeriesBuilder,
    captured_at: DateTime<Utc>,
) -> Result<PreparedBatch> {
    let events = decode_events(bytes)?;
    EVENTS_DECODED_TOTAL.inc_by(events.len() as f64);

    let snapshot = TicketAggregator::aggregate(&events);
    info!(
        total = snapshot.total_tickets,
        open = snapshot.open_tickets,
        closed = snapshot.closed_tickets,
        other_status = snapshot.other_status_tickets,
        unresponded = snapshot.unresponded_tickets,
        average_close_secs = snapshot.average_close_seconds(),
        weeks = snapshot.weekly_tickets.len(),
        months = snapshot.monthly_tickets.len(),
        issue_types = snapshot.tickets_by_issue_type.len(),
        "Aggregated ticket metrics"
    );

    let series = builder.build(&snapshot, captured_at);
    SERIES_BUILT.set(series.len() as f64);
    info!(series = series.len(), "Built series points");

    Ok(PreparedBatch {
        events: events.len(),
        snapshot,
        series,
    })
}

/// Choose the publisher for this run
pub fn publisher_from_config(config: &PublisherConfig) -> Result<Box<dyn SeriesPublisher>> {
    if !config.enabled {
        warn!("Publishing disabled, series will only be logged");
        return Ok(Box::new(LogPublisher::new()));
    }

    Ok(Box::new(RemoteWritePublisher::from_config(config)?))
}

/// Run the whole batch with the publisher described by `config`.
///
/// Input and decode failures abort with an error before anything is sent.
/// Publisher construction and delivery failures are carried in the report.
pub async fn run(config: &Config) -> Result<RunReport> {
    let batch = load_and_prepare(config).await?;

    let publish = match publisher_from_config(&config.publisher) {
        Ok(publisher) => deliver(publisher.as_ref(), &batch.series).await,
        Err(e) => {
            error!(error = %e, "Failed to set up publisher, metrics not sent");
            Err(e)
        }
    };

    Ok(RunReport { batch, publish })
}

/// Run the whole batch against a caller-supplied publisher
pub async fn run_with_publisher(
    config: &Config,
    publisher: &dyn SeriesPublisher,
) -> Result<RunReport> {
    let batch = load_and_prepare(config).await?;
    let publish = deliver(publisher, &batch.series).await;

    Ok(RunReport { batch, publish })
}

async fn load_and_prepare(config: &Config) -> Result<PreparedBatch> {
    info!(path = %config.input.path.display(), "Loading ticket events");
    let bytes = read_source(&config.input.path).await?;

    let builder = SeriesBuilder::new(config.labels.clone());
    prepare_batch(&bytes, &builder, Utc::now())
}

async fn deliver(publisher: &dyn SeriesPublisher, series: &[SeriesPoint]) -> Result<PublishOutcome> {
    info!(publisher = publisher.name(), series = series.len(), "Publishing series");

    publisher.publish(series).await.map_err(|e| match e {
        e @ (AppError::Publish(_)
        | AppError::Authentication(_)
        | AppError::Network(_)
        | AppError::Timeout(_)) => e,
        other => AppError::Publish(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_batch_rejects_bad_input() {
        let result = prepare_batch(b"not json", &SeriesBuilder::default(), Utc::now());
        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[test]
    fn test_prepare_empty_batch() {
        let batch = prepare_batch(b"[]", &SeriesBuilder::default(), Utc::now()).unwrap();
        assert_eq!(batch.events, 0);
        assert_eq!(batch.snapshot, MetricsSnapshot::default());
        assert_eq!(batch.series.len(), 9);
    }

    #[test]
    fn test_disabled_publisher_logs_only() {
        let config = PublisherConfig {
            enabled: false,
            ..PublisherConfig::default()
        };
        let publisher = publisher_from_config(&config).unwrap();
        assert_eq!(publisher.name(), "log");
    }
}
