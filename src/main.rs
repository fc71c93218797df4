use std::process::ExitCode;
use ticket_metrics_pusher::{config::Config, metrics, pipeline, telemetry};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    telemetry::init_tracing(&config.observability);

    if let Some(e) = config_error {
        tracing::warn!("Failed to load configuration: {}", e);
        tracing::warn!("Using default configuration");
    }

    tracing::info!(
        "Starting {} v{}",
        config.observability.service_name,
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = metrics::init_metrics() {
        tracing::warn!("Failed to initialize run metrics: {}", e);
    }

    let exit = match pipeline::run(&config).await {
        Ok(report) => {
            match &report.publish {
                Ok(outcome) => tracing::info!(
                    events = report.batch.events,
                    series = outcome.series_count,
                    "✅ Ticket metrics published"
                ),
                Err(e) => tracing::error!(
                    events = report.batch.events,
                    error_code = e.error_code(),
                    error = %e,
                    "Ticket metrics computed but not published"
                ),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(
                error_code = e.error_code(),
                error = %e,
                "Run aborted, no metrics sent"
            );
            ExitCode::FAILURE
        }
    };

    tracing::debug!("Run metrics:\n{}", metrics::gather_metrics());
    exit
}
