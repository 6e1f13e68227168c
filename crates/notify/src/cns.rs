use async_trait::async_trait;
use cns_core::config::ServiceConfig;
use cns_core::notification::entity::{AuthToken, ValidatedNotification};
use cns_core::notification::error::NotifyError;
use cns_core::notification::port::TransportClient;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Content type the notifications endpoint expects.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Versioned HAL media type accepted from the notifications endpoint.
pub const HAL_ACCEPT: &str = "application/hal+json;version=1";

/// # Summary
/// Transport that talks to the Central Notification Service over HTTPS.
///
/// # Invariants
/// * `client_id` and `client_secret` are non-empty.
/// * The `reqwest::Client` is reused for token and submit calls.
pub struct CnsTransport {
    /// The HTTP client used for requests.
    client: Client,
    /// OAuth2 token endpoint.
    token_url: String,
    /// Notifications endpoint.
    api_url: String,
    client_id: String,
    client_secret: String,
}

/// # Summary
/// Body returned by the OAuth2 token endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl CnsTransport {
    /// # Summary
    /// Creates a new `CnsTransport`.
    ///
    /// # Logic
    /// 1. Rejects missing client credentials.
    /// 2. Makes sure a rustls crypto provider is installed.
    /// 3. Builds an HTTP client with the configured timeout.
    ///
    /// # Arguments
    /// * `config` - Endpoints, credentials and timeout.
    ///
    /// # Returns
    /// * A new instance of `CnsTransport` or `NotifyError::Config`.
    pub fn new(config: &ServiceConfig) -> Result<Self, NotifyError> {
        if config.client_id.is_empty() || config.client_secret.is_empty() {
            return Err(NotifyError::Config(
                "client_id and client_secret must be set".to_string(),
            ));
        }

        install_crypto_provider();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NotifyError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token_url: config.token_url.clone(),
            api_url: config.api_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }
}

/// Installs the ring provider unless the process already has one.
fn install_crypto_provider() {
    if rustls::crypto::CryptoProvider::get_default().is_none()
        && rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
    {
        debug!("rustls crypto provider installed concurrently");
    }
}

#[async_trait]
impl TransportClient for CnsTransport {
    /// # Summary
    /// Exchanges the client credentials for a bearer token.
    ///
    /// # Logic
    /// 1. POSTs `grant_type=client_credentials` with HTTP Basic credentials.
    /// 2. Checks the response status.
    /// 3. Parses the token body.
    ///
    /// # Returns
    /// * `Ok(AuthToken)` on success.
    /// * `Err(NotifyError::Auth)` on network error, non-2xx status or malformed body.
    async fn fetch_auth_token(&self) -> Result<AuthToken, NotifyError> {
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| NotifyError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(NotifyError::Auth(format!(
                "Token endpoint returned {}: {}",
                status, error_text
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::Auth(format!("Malformed token response: {}", e)))?;

        debug!(expires_in = ?body.expires_in, "fetched CNS auth token");
        Ok(AuthToken::new(
            body.access_token,
            body.token_type.unwrap_or_else(|| "bearer".to_string()),
            body.expires_in,
        ))
    }

    /// # Summary
    /// Posts a validated notification to the notifications endpoint.
    ///
    /// # Logic
    /// 1. Serializes the notification to JSON.
    /// 2. Sends it with bearer auth, JSON content type and HAL accept headers.
    /// 3. Checks the response status and returns success or failure.
    ///
    /// # Returns
    /// * `Ok(())` if the service accepted the notification.
    /// * `Err(NotifyError::Transport)` if a network error occurs or the API returns a non-success status.
    async fn submit(
        &self,
        notification: &ValidatedNotification,
        token: &AuthToken,
    ) -> Result<(), NotifyError> {
        let body = serde_json::to_vec(notification)
            .map_err(|e| NotifyError::Transport(format!("Failed to encode notification: {}", e)))?;

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(token.access_token())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, HAL_ACCEPT)
            .body(body)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(NotifyError::Transport(format!(
                "CNS API returned {}: {}",
                status, error_text
            )));
        }

        info!(
            status = %response.status(),
            recipients = notification.as_notification().recipients().len(),
            "notification accepted by CNS"
        );
        Ok(())
    }
}
