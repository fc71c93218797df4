use crate::config::PublisherConfig;
use crate::error::{AppError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

/// OAuth2 client-credentials grant, credentials sent in the form body
#[derive(Clone)]
pub struct ClientCredentials {
    token_url: String,
    client_id: String,
    client_secret: String,
    scopes: Vec<String>,
}

/// Bearer token returned by the token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl ClientCredentials {
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes,
        }
    }

    /// Read client id and secret from the environment variables named in config
    pub fn from_env(config: &PublisherConfig) -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name).map_err(|_| {
                AppError::Authentication(format!("Environment variable {} is not set", name))
            })
        };

        Ok(Self::new(
            config.token_url.clone(),
            read(&config.client_id_env)?,
            read(&config.client_secret_env)?,
            config.scopes.clone(),
        ))
    }

    /// Exchange the client credentials for an access token
    pub async fn fetch_token(&self, client: &Client) -> Result<AccessToken> {
        let scope = self.scopes.join(" ");
        let mut form = vec![
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        if !scope.is_empty() {
            form.push(("scope", scope.as_str()));
        }

        let response = client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(format!("Token request timed out: {}", e))
                } else {
                    AppError::Authentication(format!("Token request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            error!(status = %status, token_url = %self.token_url, "Token endpoint rejected client credentials");
            return Err(AppError::Authentication(format!(
                "Token endpoint returned {}: {}",
                status,
                if body.is_empty() { "No response body" } else { &body }
            )));
        }

        let token: AccessToken = serde_json::from_str(&body).map_err(|e| {
            AppError::Authentication(format!("Malformed token response: {}", e))
        })?;

        if token.access_token.is_empty() {
            return Err(AppError::Authentication(
                "Token response carried an empty access_token".to_string(),
            ));
        }

        debug!(token_type = ?token.token_type, "Acquired access token");
        Ok(token)
    }
}
