use cns_core::notification::entity::Notification;
use cns_core::notification::error::NotifyError;
use cns_core::notification::port::TransportClient;
use cns_core::notification::validator::NotificationValidator;
use std::sync::Arc;
use tracing::{info, warn};

/// # Summary
/// Pushes notifications to the service: validate, authenticate, submit.
///
/// # Invariants
/// * `submit` is never called for a notification that failed validation.
/// * Holds no per-notification state; one instance can serve many calls.
pub struct NotificationService {
    transport: Arc<dyn TransportClient>,
    validator: NotificationValidator,
}

impl NotificationService {
    pub fn new(transport: Arc<dyn TransportClient>, validator: NotificationValidator) -> Self {
        Self {
            transport,
            validator,
        }
    }

    /// # Summary
    /// Delivers one notification.
    ///
    /// # Logic
    /// 1. Validates the notification; all violations are returned together.
    /// 2. Fetches a fresh auth token.
    /// 3. Submits the validated notification with that token.
    ///
    /// # Arguments
    /// * `notification` - Consumed; a notification is single-use per send attempt.
    ///
    /// # Returns
    /// * `Ok(())` once the service accepted the notification.
    /// * `Err(NotifyError::Validation)` before any network call if invalid.
    /// * `Err(NotifyError::Auth | NotifyError::Transport)` as reported by the transport.
    pub async fn push(&self, notification: Notification) -> Result<(), NotifyError> {
        let validated = self.validator.check(notification).map_err(|e| {
            warn!(errors = ?e.errors(), "notification failed validation");
            NotifyError::from(e)
        })?;

        let token = self.transport.fetch_auth_token().await?;
        self.transport.submit(&validated, &token).await?;

        info!(
            title = validated.as_notification().title().unwrap_or_default(),
            "notification pushed"
        );
        Ok(())
    }
}
