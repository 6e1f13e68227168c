use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::notification::entity::Field;

/// # Summary
/// Field-level rejection raised by `NotificationBuilder` at set time.
///
/// # Invariants
/// - A setter that returns this error has not modified the notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// A text field exceeds its maximum character length.
    #[error("{field} cannot exceed {max} characters (got {actual})")]
    Length {
        field: Field,
        max: usize,
        actual: usize,
    },

    /// The requested expiry lies beyond the permitted future window.
    #[error("expiration date {expires_at} must be no more than {max_days} days into the future")]
    Range {
        expires_at: DateTime<Utc>,
        max_days: i64,
    },

    /// A draft carried an expiration date that is not `YYYY-MM-DD`.
    #[error("invalid expiration date: {0}")]
    InvalidDate(String),
}

/// # Summary
/// Aggregate validation failure carrying every violation found.
///
/// # Invariants
/// - `errors` is never empty and keeps the validator's check order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("notification failed validation: {}", .errors.join("; "))]
pub struct ValidationError {
    errors: Vec<String>,
}

impl ValidationError {
    pub(crate) fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Individual violation messages, in check order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// # Summary
/// Delivery error for pushing a notification to the service.
///
/// # Invariants
/// - Must derive `Error` through `thiserror`.
/// - Never retried by this crate; retry policy belongs to the caller.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The notification did not pass pre-flight validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Token exchange failed (bad credentials, network, malformed token body)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Submission failed (network error or non-2xx response)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error (e.g. missing client credentials)
    #[error("Configuration error: {0}")]
    Config(String),
}
