use serde::{Deserialize, Serialize};
use std::fmt;

/// Default OAuth2 token endpoint of the Central Notification Service.
pub const DEFAULT_TOKEN_URL: &str = "https://notifications.iu.edu/oauth/token";

/// Default notifications REST endpoint of the Central Notification Service.
pub const DEFAULT_API_URL: &str = "https://notifications.iu.edu/rest-api/secure/notifications";

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub log: LogConfig,
}

/// # Summary
/// Connection settings for the notification service.
///
/// # Invariants
/// - `client_id` and `client_secret` are issued by the service administrators;
///   the defaults are empty and must be overwritten by config or environment.
/// - `Debug` never prints `client_secret`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub token_url: String,
    pub api_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Per-request timeout for token and submit calls.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            timeout_secs: 10,
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("token_url", &self.token_url)
            .field("api_url", &self.api_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
