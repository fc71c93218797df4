use crate::error::{AppError, Result};
use std::path::Path;
use tracing::debug;

/// Read the whole input batch from a local file.
pub async fn read_source(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();

    match tokio::fs::read(path).await {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "Read input source");
            Ok(bytes)
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Failed to read input source");
            Err(AppError::InputUnavailable {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    }
}
