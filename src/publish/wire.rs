//! Prometheus remote-write 0.1.0 wire format
//!
//! Message definitions mirror `prometheus/prompb/remote.proto` and
//! `types.proto`; only the fields needed to push samples are modeled.

use crate::analytics::SeriesPoint;
use crate::error::{AppError, Result};
use prost::Message;

/// Reserved label carrying the metric name
pub const METRIC_NAME_LABEL: &str = "__name__";

#[derive(Clone, PartialEq, Message)]
pub struct WriteRequest {
    #[prost(message, repeated, tag = "1")]
    pub timeseries: Vec<TimeSeries>,
}

#[derive(Clone, PartialEq, Message)]
pub struct TimeSeries {
    #[prost(message, repeated, tag = "1")]
    pub labels: Vec<Label>,
    #[prost(message, repeated, tag = "2")]
    pub samples: Vec<Sample>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Label {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

#[derive(Clone, PartialEq, Message)]
pub struct Sample {
    #[prost(double, tag = "1")]
    pub value: f64,
    /// Milliseconds since the Unix epoch
    #[prost(int64, tag = "2")]
    pub timestamp: i64,
}

impl From<&SeriesPoint> for TimeSeries {
    fn from(point: &SeriesPoint) -> Self {
        // Receivers reject series whose labels are not sorted by name
        let mut labels: Vec<Label> = Vec::with_capacity(point.labels.len() + 1);
        labels.push(Label {
            name: METRIC_NAME_LABEL.to_string(),
            value: point.name.clone(),
        });
        labels.extend(
            point
                .labels
                .iter()
                .filter(|(name, _)| name.as_str() != METRIC_NAME_LABEL)
                .map(|(name, value)| Label {
                    name: name.clone(),
                    value: value.clone(),
                }),
        );
        labels.sort_by(|a, b| a.name.cmp(&b.name));

        TimeSeries {
            labels,
            samples: vec![Sample {
                value: point.value,
                timestamp: point.timestamp.timestamp_millis(),
            }],
        }
    }
}

/// Build the write request for a batch of points
pub fn write_request(series: &[SeriesPoint]) -> WriteRequest {
    WriteRequest {
        timeseries: series.iter().map(TimeSeries::from).collect(),
    }
}

/// Protobuf-encode and snappy-compress a batch of points
pub fn encode_write_request(series: &[SeriesPoint]) -> Result<Vec<u8>> {
    let protobuf = write_request(series).encode_to_vec();

    snap::raw::Encoder::new()
        .compress_vec(&protobuf)
        .map_err(|e| AppError::Serialization(format!("Snappy compression failed: {}", e)))
}

/// Inverse of [`encode_write_request`]
pub fn decode_write_request(body: &[u8]) -> Result<WriteRequest> {
    let protobuf = snap::raw::Decoder::new()
        .decompress_vec(body)
        .map_err(|e| AppError::Serialization(format!("Snappy decompression failed: {}", e)))?;

    WriteRequest::decode(protobuf.as_slice())
        .map_err(|e| AppError::Serialization(format!("Invalid write request: {}", e)))
}
