//! Delivery of series points to the monitoring backend
//!
//! [`RemoteWritePublisher`] pushes over Prometheus remote write with an
//! OAuth2 bearer token; [`LogPublisher`] only logs the points and is used for
//! dry runs.

mod dry_run;
mod oauth;
mod remote_write;
pub mod wire;

pub use dry_run::LogPublisher;
pub use oauth::{AccessToken, ClientCredentials};
pub use remote_write::RemoteWritePublisher;

use crate::analytics::SeriesPoint;
use crate::error::Result;
use async_trait::async_trait;

/// Outcome of a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Number of series accepted
    pub series_count: usize,
    /// HTTP status returned by the endpoint, if any
    pub status: Option<u16>,
}

/// Sink for a complete batch of series points.
///
/// A publish either delivers the whole batch or fails as a whole; there is
/// no partial-success state and no retry.
#[async_trait]
pub trait SeriesPublisher: Send + Sync {
    /// Short name used in logs and metric labels
    fn name(&self) -> &str;

    /// Deliver every point in one request
    async fn publish(&self, series: &[SeriesPoint]) -> Result<PublishOutcome>;
}
