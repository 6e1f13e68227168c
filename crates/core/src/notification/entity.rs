use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of days a notification may stay live.
pub const MAX_EXPIRATION_DAYS: i64 = 30;

/// # Summary
/// Length-limited fields of a notification.
///
/// # Invariants
/// - `max_length` is the single source of limits for both the builder and
///   the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Summary,
    SmsDescription,
    PrimaryActionUrl,
    SecondaryActionUrl,
    Type,
    ReplyTo,
    RecipientUsername,
    RecipientEmail,
}

impl Field {
    /// Maximum length in characters.
    pub const fn max_length(self) -> usize {
        match self {
            Field::Title => 50,
            Field::Summary => 100,
            Field::SmsDescription => 400,
            Field::PrimaryActionUrl | Field::SecondaryActionUrl => 2000,
            Field::Type => 100,
            Field::ReplyTo => 100,
            Field::RecipientUsername => 100,
            Field::RecipientEmail => 100,
        }
    }

    /// Character count of `value` when it exceeds the limit, `None` otherwise.
    pub(crate) fn length_if_over(self, value: &str) -> Option<usize> {
        let len = value.chars().count();
        (len > self.max_length()).then_some(len)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Title => "notification title",
            Field::Summary => "notification summary",
            Field::SmsDescription => "notification SMS description",
            Field::PrimaryActionUrl => "notification primary action URL",
            Field::SecondaryActionUrl => "notification secondary action URL",
            Field::Type => "notification type name",
            Field::ReplyTo => "notification reply-to email address",
            Field::RecipientUsername => "recipient username",
            Field::RecipientEmail => "recipient email address",
        };
        f.write_str(label)
    }
}

/// Delivery priority. Serialized as `"NORMAL"` / `"URGENT"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    #[default]
    Normal,
    Urgent,
}

/// A single addressee of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub username: String,
    pub email: String,
}

/// # Summary
/// One message to be delivered by the notification service.
///
/// # Invariants
/// - Only `NotificationBuilder` creates or mutates it; once built it is read-only.
/// - `recipients` keeps insertion order, which is significant downstream.
/// - Serializes to the service's wire format: camelCase keys, unset text
///   fields as `null`, `expirationDate` as unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub(crate) title: Option<String>,
    pub(crate) summary: Option<String>,
    #[serde(rename = "smsDescription")]
    pub(crate) sms_description: Option<String>,
    pub(crate) priority: Priority,
    #[serde(rename = "primaryActionURL")]
    pub(crate) primary_action_url: Option<String>,
    #[serde(rename = "secondaryActionURL")]
    pub(crate) secondary_action_url: Option<String>,
    #[serde(rename = "notificationType")]
    pub(crate) notification_type: Option<String>,
    #[serde(rename = "expirationDate", with = "chrono::serde::ts_seconds")]
    pub(crate) expires_at: DateTime<Utc>,
    #[serde(rename = "replyTo")]
    pub(crate) reply_to: Option<String>,
    pub(crate) recipients: Vec<Recipient>,
}

impl Notification {
    /// Empty notification with NORMAL priority expiring at `expires_at`.
    pub(crate) fn empty(expires_at: DateTime<Utc>) -> Self {
        Self {
            title: None,
            summary: None,
            sms_description: None,
            priority: Priority::Normal,
            primary_action_url: None,
            secondary_action_url: None,
            notification_type: None,
            expires_at,
            reply_to: None,
            recipients: Vec::new(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn sms_description(&self) -> Option<&str> {
        self.sms_description.as_deref()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn primary_action_url(&self) -> Option<&str> {
        self.primary_action_url.as_deref()
    }

    pub fn secondary_action_url(&self) -> Option<&str> {
        self.secondary_action_url.as_deref()
    }

    /// Type name registered with the service. Registration is checked server-side only.
    pub fn notification_type(&self) -> Option<&str> {
        self.notification_type.as_deref()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn reply_to(&self) -> Option<&str> {
        self.reply_to.as_deref()
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    /// # Summary
    /// Renders the wire payload.
    ///
    /// # Returns
    /// The JSON value posted to the notifications endpoint.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// # Summary
/// A notification that passed `NotificationValidator`.
///
/// # Invariants
/// - Only the validator constructs it, so holding one proves the checks ran.
/// - Serializes exactly like the wrapped notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedNotification(Notification);

impl ValidatedNotification {
    pub(crate) fn new(notification: Notification) -> Self {
        Self(notification)
    }

    pub fn as_notification(&self) -> &Notification {
        &self.0
    }

    pub fn into_inner(self) -> Notification {
        self.0
    }
}

/// # Summary
/// Declarative description of a notification, e.g. loaded from a JSON file.
///
/// # Invariants
/// - Carries raw input only; `NotificationBuilder::from_draft` applies every
///   field guard when turning it into a `Notification`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationDraft {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub sms_description: Option<String>,
    pub primary_action_url: Option<String>,
    pub secondary_action_url: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub reply_to: Option<String>,
    /// Calendar date in `YYYY-MM-DD` format.
    pub expiration_date: Option<String>,
    pub urgent: bool,
    pub recipients: Vec<Recipient>,
}

/// # Summary
/// Bearer token issued by the service's OAuth2 token endpoint.
///
/// # Invariants
/// - `Debug` never prints the access token.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    access_token: String,
    token_type: String,
    expires_in: Option<u64>,
}

impl AuthToken {
    pub fn new(access_token: String, token_type: String, expires_in: Option<u64>) -> Self {
        Self {
            access_token,
            token_type,
            expires_in,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Token lifetime in seconds, when the endpoint reports one.
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_notification_serializes_nulls() {
        let expires_at = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        let json = Notification::empty(expires_at).to_json().unwrap();

        assert_eq!(json["title"], serde_json::Value::Null);
        assert_eq!(json["priority"], "NORMAL");
        assert_eq!(json["expirationDate"], expires_at.timestamp());
        assert_eq!(json["recipients"], serde_json::json!([]));
        assert!(json.get("primaryActionURL").is_some());
        assert!(json.get("notificationType").is_some());
    }

    #[test]
    fn test_field_length_counts_characters() {
        let accented = "é".repeat(50);
        assert_eq!(Field::Title.length_if_over(&accented), None);
        assert_eq!(Field::Title.length_if_over(&"é".repeat(51)), Some(51));
    }

    #[test]
    fn test_auth_token_debug_redacts_secret() {
        let token = AuthToken::new("s3cr3t".to_string(), "bearer".to_string(), Some(3600));
        let printed = format!("{:?}", token);
        assert!(!printed.contains("s3cr3t"));
        assert!(printed.contains("bearer"));
    }

    #[test]
    fn test_draft_deserializes_camel_case() {
        let draft: NotificationDraft = serde_json::from_str(
            r#"{
                "title": "Outage",
                "smsDescription": "CAS is down",
                "type": "IT Alert",
                "expirationDate": "2026-02-01",
                "urgent": true,
                "recipients": [{"username": "jdoe", "email": "jdoe@iu.edu"}]
            }"#,
        )
        .unwrap();

        assert_eq!(draft.title.as_deref(), Some("Outage"));
        assert_eq!(draft.sms_description.as_deref(), Some("CAS is down"));
        assert_eq!(draft.notification_type.as_deref(), Some("IT Alert"));
        assert_eq!(draft.expiration_date.as_deref(), Some("2026-02-01"));
        assert!(draft.urgent);
        assert_eq!(draft.recipients.len(), 1);
        assert!(draft.summary.is_none());
    }
}
