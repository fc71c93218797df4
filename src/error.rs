use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// The input source could not be opened or read
    #[error("Input unavailable ({path}): {message}")]
    InputUnavailable { path: String, message: String },

    /// Input bytes did not decode into ticket events
    #[error("Decode error: {0}")]
    Decode(String),

    /// The remote-write endpoint rejected or failed the push
    #[error("Publish error: {0}")]
    Publish(String),

    /// Token acquisition failed
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Network errors
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout errors
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::InputUnavailable { .. } => "INPUT_UNAVAILABLE",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Publish(_) => "PUBLISH_ERROR",
            AppError::Authentication(_) => "AUTHENTICATION_ERROR",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Timeout(_) => "TIMEOUT",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether this error aborts the run before anything is published.
    ///
    /// Delivery failures (publish, auth, network, timeout) are reported but
    /// leave the computed metrics intact.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::InputUnavailable { .. }
                | AppError::Decode(_)
                | AppError::Configuration(_)
        )
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
