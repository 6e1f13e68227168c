use std::sync::Arc;

use cns_core::common::time::RealTimeProvider;
use cns_core::config::AppConfig;
use cns_core::notification::builder::NotificationBuilder;
use cns_core::notification::entity::NotificationDraft;
use cns_core::notification::validator::NotificationValidator;
use cns_notify::cns::CnsTransport;
use cns_notify::service::NotificationService;
use config::{Config, ConfigError, Environment, File, Source};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Config file looked up when no path is given (any format `config` understands).
const DEFAULT_CONFIG: &str = "cns";

/// # Summary
/// Pushes one notification, described by a JSON draft file, to the CNS.
///
/// Usage: `cns-push <draft.json> [config-file]`
///
/// # Logic
/// 1. Load configuration (optional file, then `CNS__*` environment variables).
/// 2. Initialize logging.
/// 3. Replay the draft through `NotificationBuilder`.
/// 4. Validate and deliver via `NotificationService`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let draft_path = args
        .next()
        .ok_or("usage: cns-push <draft.json> [config-file]")?;
    let config_path = args.next();

    // 1. Configuration
    let app_config = load_config(config_path.as_deref())?;

    // 2. Logging, RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&app_config.log.level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!(draft = %draft_path, "CNS client starting...");

    // 3. Compose
    let draft: NotificationDraft = serde_json::from_str(&std::fs::read_to_string(&draft_path)?)?;
    let notification = NotificationBuilder::from_draft(draft, Arc::new(RealTimeProvider))?.build();

    // 4. Deliver
    let transport = Arc::new(CnsTransport::new(&app_config.service)?);
    let service = NotificationService::new(transport, NotificationValidator::new());
    service.push(notification).await?;

    info!("Done.");
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    layered(File::with_name(path.unwrap_or(DEFAULT_CONFIG)).required(path.is_some()))
}

/// Layers `CNS__SECTION__KEY` environment variables over `file`.
fn layered<S>(file: S) -> Result<AppConfig, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("CNS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_file_values_override_defaults() {
        let toml = r#"
            [service]
            client_id = "abc"
            client_secret = "xyz"
            timeout_secs = 3

            [log]
            level = "debug"
        "#;
        let config = layered(File::from_str(toml, FileFormat::Toml)).unwrap();

        assert_eq!(config.service.client_id, "abc");
        assert_eq!(config.service.client_secret, "xyz");
        assert_eq!(config.service.timeout_secs, 3);
        assert_eq!(config.service.api_url, cns_core::config::DEFAULT_API_URL);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_missing_default_file_is_optional() {
        let config = load_config(None).unwrap();
        assert_eq!(config.service.token_url, cns_core::config::DEFAULT_TOKEN_URL);
    }
}
