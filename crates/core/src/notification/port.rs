use crate::notification::entity::{AuthToken, ValidatedNotification};
use crate::notification::error::NotifyError;
use async_trait::async_trait;

/// # Summary
/// Interface to the remote notification service.
///
/// # Invariants
/// - Implementations must be `Send` and `Sync` to allow concurrent use.
/// - `submit` only accepts `ValidatedNotification`, so nothing unvalidated
///   can reach the wire.
/// - Failures are surfaced as-is; implementations do not retry.
#[async_trait]
pub trait TransportClient: Send + Sync {
    /// # Summary
    /// Obtains a bearer token via the OAuth2 client-credentials exchange.
    ///
    /// # Returns
    /// * `Ok(AuthToken)` on success.
    /// * `Err(NotifyError::Auth)` on credential or network failure.
    async fn fetch_auth_token(&self) -> Result<AuthToken, NotifyError>;

    /// # Summary
    /// Posts a notification to the service.
    ///
    /// # Logic
    /// 1. Serializes the notification to the service's JSON payload.
    /// 2. Sends it with the bearer token.
    /// 3. Maps non-2xx responses to errors.
    ///
    /// # Returns
    /// * `Ok(())` when the service accepted the notification.
    /// * `Err(NotifyError::Transport)` on non-2xx response or network failure.
    async fn submit(
        &self,
        notification: &ValidatedNotification,
        token: &AuthToken,
    ) -> Result<(), NotifyError>;
}
