//! Support-ticket metrics pusher
//!
//! Reads a batch of ticket events exported from the ticket store, computes
//! volume, severity, status, close-time and trend metrics, and pushes them as
//! labeled series to a Prometheus remote-write endpoint.

pub mod analytics;
pub mod config;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod publish;
pub mod telemetry;

pub use error::{AppError, Result};
