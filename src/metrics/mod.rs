//! Prometheus counters describing the job's own run.
//!
//! These measure the pusher itself (events decoded, series built, push
//! attempts and failures). They live in a process-local registry and are
//! dumped to the log at the end of a run; they are never pushed.
//!
//! # Example
//! ```no_run
//! use ticket_metrics_pusher::metrics::{init_metrics, EVENTS_DECODED_TOTAL};
//!
//! init_metrics().unwrap();
//! EVENTS_DECODED_TOTAL.inc_by(42.0);
//! ```

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Gauge, Histogram, HistogramOpts, Opts, Registry};

const NAMESPACE: &str = "ticket_metrics_pusher";

lazy_static! {
    /// Registry for the job's own metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    /// Ticket events decoded from the input batch
    pub static ref EVENTS_DECODED_TOTAL: Counter = Counter::with_opts(
        Opts::new("events_decoded_total", "Ticket events decoded from the input batch")
            .namespace(NAMESPACE),
    ).expect("Failed to create EVENTS_DECODED_TOTAL metric");

    /// Series points produced from the snapshot
    pub static ref SERIES_BUILT: Gauge = Gauge::with_opts(
        Opts::new("series_built", "Series points produced from the last snapshot")
            .namespace(NAMESPACE),
    ).expect("Failed to create SERIES_BUILT metric");

    /// Publish attempts
    ///
    /// Labels: publisher
    pub static ref PUBLISH_ATTEMPTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("publish_attempts_total", "Series publish attempts").namespace(NAMESPACE),
        &["publisher"]
    ).expect("Failed to create PUBLISH_ATTEMPTS_TOTAL metric");

    /// Publish failures
    ///
    /// Labels: publisher, error_code
    pub static ref PUBLISH_FAILURES_TOTAL: CounterVec = CounterVec::new(
        Opts::new("publish_failures_total", "Series publish failures").namespace(NAMESPACE),
        &["publisher", "error_code"]
    ).expect("Failed to create PUBLISH_FAILURES_TOTAL metric");

    /// Wall time of a publish, token exchange included
    pub static ref PUBLISH_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new("publish_duration_seconds", "Publish duration in seconds")
            .namespace(NAMESPACE)
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
    ).expect("Failed to create PUBLISH_DURATION_SECONDS metric");
}

/// Register every run metric with [`PROMETHEUS_REGISTRY`].
///
/// Safe to call more than once.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(EVENTS_DECODED_TOTAL.clone()),
        Box::new(SERIES_BUILT.clone()),
        Box::new(PUBLISH_ATTEMPTS_TOTAL.clone()),
        Box::new(PUBLISH_FAILURES_TOTAL.clone()),
        Box::new(PUBLISH_DURATION_SECONDS.clone()),
    ];

    for collector in collectors {
        match PROMETHEUS_REGISTRY.register(collector) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Export the registry in Prometheus text format
pub fn gather_metrics() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = PROMETHEUS_REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Failed to convert metrics to string: {}", e);
        String::from("# Error converting metrics\n")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        assert!(init_metrics().is_ok());
        assert!(init_metrics().is_ok());
    }

    #[test]
    fn test_gather_contains_namespaced_metrics() {
        init_metrics().unwrap();
        PUBLISH_ATTEMPTS_TOTAL.with_label_values(&["test"]).inc();

        let output = gather_metrics();
        assert!(output.contains("ticket_metrics_pusher_publish_attempts_total"));
        assert!(output.contains("ticket_metrics_pusher_events_decoded_total"));
    }
}
