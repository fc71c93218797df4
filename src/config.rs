use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input source configuration
    #[serde(default)]
    pub input: InputConfig,

    /// Base labels attached to every series
    #[serde(default = "default_labels")]
    pub labels: BTreeMap<String, String>,

    /// Remote-write publisher configuration
    #[serde(default)]
    pub publisher: PublisherConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var("CONFIG_PATH")
            .unwrap_or_else(|_| "config/ticket-metrics.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: TICKET_METRICS__)
            .add_source(
                config::Environment::with_prefix("TICKET_METRICS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            labels: default_labels(),
            publisher: PublisherConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path of the JSON ticket export
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Push to the remote-write endpoint; when false the series are only logged
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Remote-write endpoint
    #[serde(default = "default_write_url")]
    pub write_url: String,

    /// OAuth2 token endpoint for the client-credentials grant
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Requested token scopes
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    /// Client id (from env var)
    #[serde(default = "default_client_id_env")]
    pub client_id_env: String,

    /// Client secret (from env var)
    #[serde(default = "default_client_secret_env")]
    pub client_secret_env: String,

    /// HTTP timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            write_url: default_write_url(),
            token_url: default_token_url(),
            scopes: default_scopes(),
            client_id_env: default_client_id_env(),
            client_secret_env: default_client_secret_env(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
            service_name: default_service_name(),
        }
    }
}

// Default value functions
fn default_labels() -> BTreeMap<String, String> {
    [
        ("product_id", "admiral"),
        ("region", "westeurope"),
        ("provider", "azure"),
        ("env", "dev"),
        ("app", "admiral"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

fn default_input_path() -> PathBuf {
    PathBuf::from("source_data.json")
}

fn default_write_url() -> String {
    "https://telemetry.example.com/api/v1/push".to_string()
}

fn default_token_url() -> String {
    "https://login.microsoftonline.com/common/oauth2/v2.0/token".to_string()
}

fn default_scopes() -> Vec<String> {
    vec!["api://ingestion/.default".to_string()]
}

fn default_client_id_env() -> String {
    "AZURE_CLIENT_ID".to_string()
}

fn default_client_secret_env() -> String {
    "AZURE_CLIENT_SECRET".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Metrics Writer 1.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "ticket-metrics-pusher".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.input.path, PathBuf::from("source_data.json"));
        assert_eq!(config.publisher.timeout_secs, 30);
        assert_eq!(config.publisher.user_agent, "Metrics Writer 1.0");
        assert_eq!(config.labels.get("region").map(String::as_str), Some("westeurope"));
        assert_eq!(config.labels.len(), 5);
        assert!(config.publisher.enabled);
    }

    #[test]
    fn test_embedded_defaults_parse() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.labels, default_labels());
        assert_eq!(config.publisher.client_id_env, "AZURE_CLIENT_ID");
        assert_eq!(config.observability.service_name, "ticket-metrics-pusher");
    }
}
