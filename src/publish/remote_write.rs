use super::oauth::ClientCredentials;
use super::wire::encode_write_request;
use super::{PublishOutcome, SeriesPublisher};
use crate::analytics::SeriesPoint;
use crate::config::PublisherConfig;
use crate::error::{AppError, Result};
use crate::metrics::{PUBLISH_ATTEMPTS_TOTAL, PUBLISH_DURATION_SECONDS, PUBLISH_FAILURES_TOTAL};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_ENCODING, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{error, info};

const REMOTE_WRITE_VERSION_HEADER: &str = "X-Prometheus-Remote-Write-Version";
const REMOTE_WRITE_VERSION: &str = "0.1.0";

/// Pushes series to a Prometheus remote-write endpoint
#[derive(Debug, Clone)]
pub struct RemoteWritePublisher {
    pub(crate) client: Client,
    write_url: String,
    user_agent: String,
    timeout_secs: u64,
    credentials: ClientCredentials,
}

impl RemoteWritePublisher {
    /// Create a new remote-write publisher
    pub fn new(
        write_url: impl Into<String>,
        credentials: ClientCredentials,
        user_agent: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            write_url: write_url.into(),
            user_agent: user_agent.into(),
            timeout_secs,
            credentials,
        })
    }

    /// Build from configuration, reading client credentials from the environment
    pub fn from_config(config: &PublisherConfig) -> Result<Self> {
        Self::new(
            config.write_url.clone(),
            ClientCredentials::from_env(config)?,
            config.user_agent.clone(),
            config.timeout_secs,
        )
    }

    async fn push(&self, series: &[SeriesPoint]) -> Result<PublishOutcome> {
        let token = self.credentials.fetch_token(&self.client).await?;
        let body = encode_write_request(series)?;

        let response = self
            .client
            .post(&self.write_url)
            .header(CONTENT_ENCODING, "snappy")
            .header(CONTENT_TYPE, "application/x-protobuf")
            .header(USER_AGENT, self.user_agent.as_str())
            .header(REMOTE_WRITE_VERSION_HEADER, REMOTE_WRITE_VERSION)
            .header(AUTHORIZATION, format!("Bearer {}", token.access_token))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(format!(
                        "Remote write timed out after {} seconds",
                        self.timeout_secs
                    ))
                } else if e.is_connect() {
                    AppError::Network(format!("Failed to connect to remote-write endpoint: {}", e))
                } else {
                    AppError::Network(format!("Remote write request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(AppError::Publish(format!(
                "Remote write returned non-success status {}: {}",
                status,
                if body.is_empty() { "No response body" } else { &body }
            )));
        }

        Ok(PublishOutcome {
            series_count: series.len(),
            status: Some(status.as_u16()),
        })
    }
}

#[async_trait]
impl SeriesPublisher for RemoteWritePublisher {
    fn name(&self) -> &str {
        "remote_write"
    }

    async fn publish(&self, series: &[SeriesPoint]) -> Result<PublishOutcome> {
        PUBLISH_ATTEMPTS_TOTAL.with_label_values(&[self.name()]).inc();
        let started = Instant::now();

        let result = self.push(series).await;
        PUBLISH_DURATION_SECONDS.observe(started.elapsed().as_secs_f64());

        match &result {
            Ok(outcome) => info!(
                url = %self.write_url,
                series = outcome.series_count,
                status = ?outcome.status,
                "Series pushed to remote-write endpoint"
            ),
            Err(e) => {
                PUBLISH_FAILURES_TOTAL
                    .with_label_values(&[self.name(), e.error_code()])
                    .inc();
                error!(
                    url = %self.write_url,
                    series = series.len(),
                    error = %e,
                    "Failed to push series"
                );
            }
        }

        result
    }
}
