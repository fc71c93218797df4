use super::{PublishOutcome, SeriesPublisher};
use crate::analytics::SeriesPoint;
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

/// Publisher that writes each point to the log instead of the network
#[derive(Debug, Clone, Default)]
pub struct LogPublisher;

impl LogPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SeriesPublisher for LogPublisher {
    fn name(&self) -> &str {
        "log"
    }

    async fn publish(&self, series: &[SeriesPoint]) -> Result<PublishOutcome> {
        for point in series {
            let labels = point
                .labels
                .iter()
                .map(|(name, value)| format!("{}=\"{}\"", name, value))
                .collect::<Vec<_>>()
                .join(",");

            info!(
                metric = %point.name,
                labels = %labels,
                value = point.value,
                timestamp = %point.timestamp.to_rfc3339(),
                "Series point (dry run)"
            );
        }

        Ok(PublishOutcome {
            series_count: series.len(),
            status: None,
        })
    }
}
