use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::common::time::{RealTimeProvider, TimeProvider};
use crate::notification::entity::{
    Field, MAX_EXPIRATION_DAYS, Notification, NotificationDraft, Priority, Recipient,
};
use crate::notification::error::NotificationError;

/// Latest permitted expiry for a notification composed or checked at `now`.
/// Saturates at the end of chrono's range instead of overflowing.
pub(crate) fn latest_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(MAX_EXPIRATION_DAYS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// # Summary
/// Fluent builder that assembles a `Notification` and rejects bad values as
/// soon as they are set.
///
/// # Invariants
/// - A failed setter leaves the in-progress notification untouched.
/// - The default expiry is `clock.now() + 30 days`, read once at creation.
/// - Date-only expirations resolve to 00:00 UTC of that day.
///
/// # Example
/// ```
/// use cns_core::notification::builder::NotificationBuilder;
///
/// # fn main() -> Result<(), cns_core::notification::error::NotificationError> {
/// let mut builder = NotificationBuilder::new();
/// builder
///     .set_title("Outage")?
///     .set_type("IT Alert")?
///     .add_recipient("jdoe", "jdoe@iu.edu")?
///     .flag_as_urgent();
/// let notification = builder.build();
/// assert_eq!(notification.title(), Some("Outage"));
/// # Ok(())
/// # }
/// ```
pub struct NotificationBuilder {
    clock: Arc<dyn TimeProvider>,
    notification: Notification,
}

impl NotificationBuilder {
    /// Builder backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(RealTimeProvider))
    }

    /// Builder whose expiry default and bound are measured against `clock`.
    pub fn with_clock(clock: Arc<dyn TimeProvider>) -> Self {
        let expires_at = latest_expiry(clock.now());
        Self {
            clock,
            notification: Notification::empty(expires_at),
        }
    }

    /// # Summary
    /// Replays a draft through the fluent setters.
    ///
    /// # Logic
    /// 1. Applies each populated text field with its length guard.
    /// 2. Parses `expirationDate` as `YYYY-MM-DD` and applies the range guard.
    /// 3. Escalates priority when `urgent` is set.
    /// 4. Appends recipients in draft order.
    ///
    /// # Returns
    /// The populated builder, or the first field-level error encountered.
    pub fn from_draft(
        draft: NotificationDraft,
        clock: Arc<dyn TimeProvider>,
    ) -> Result<Self, NotificationError> {
        let mut builder = Self::with_clock(clock);

        if let Some(title) = draft.title {
            builder.set_title(title)?;
        }
        if let Some(summary) = draft.summary {
            builder.set_summary(summary)?;
        }
        if let Some(sms) = draft.sms_description {
            builder.set_sms_description(sms)?;
        }
        if let Some(url) = draft.primary_action_url {
            builder.set_primary_action_url(url)?;
        }
        if let Some(url) = draft.secondary_action_url {
            builder.set_secondary_action_url(url)?;
        }
        if let Some(kind) = draft.notification_type {
            builder.set_type(kind)?;
        }
        if let Some(email) = draft.reply_to {
            builder.set_reply_to_email(email)?;
        }
        if let Some(raw) = draft.expiration_date {
            let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|e| NotificationError::InvalidDate(format!("{}: {}", raw, e)))?;
            builder.set_expiration_date(date)?;
        }
        if draft.urgent {
            builder.flag_as_urgent();
        }
        for recipient in draft.recipients {
            builder.add_recipient(recipient.username, recipient.email)?;
        }

        Ok(builder)
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<&mut Self, NotificationError> {
        self.notification.title = Some(checked(Field::Title, title.into())?);
        Ok(self)
    }

    pub fn set_summary(
        &mut self,
        summary: impl Into<String>,
    ) -> Result<&mut Self, NotificationError> {
        self.notification.summary = Some(checked(Field::Summary, summary.into())?);
        Ok(self)
    }

    pub fn set_sms_description(
        &mut self,
        sms_description: impl Into<String>,
    ) -> Result<&mut Self, NotificationError> {
        self.notification.sms_description =
            Some(checked(Field::SmsDescription, sms_description.into())?);
        Ok(self)
    }

    pub fn set_primary_action_url(
        &mut self,
        url: impl Into<String>,
    ) -> Result<&mut Self, NotificationError> {
        self.notification.primary_action_url = Some(checked(Field::PrimaryActionUrl, url.into())?);
        Ok(self)
    }

    pub fn set_secondary_action_url(
        &mut self,
        url: impl Into<String>,
    ) -> Result<&mut Self, NotificationError> {
        self.notification.secondary_action_url =
            Some(checked(Field::SecondaryActionUrl, url.into())?);
        Ok(self)
    }

    /// Sets the notification type. The type must already be registered with
    /// the service; only its length is checked here.
    pub fn set_type(&mut self, kind: impl Into<String>) -> Result<&mut Self, NotificationError> {
        self.notification.notification_type = Some(checked(Field::Type, kind.into())?);
        Ok(self)
    }

    pub fn set_reply_to_email(
        &mut self,
        email: impl Into<String>,
    ) -> Result<&mut Self, NotificationError> {
        self.notification.reply_to = Some(checked(Field::ReplyTo, email.into())?);
        Ok(self)
    }

    /// Appends a recipient. Both values are checked before anything is stored.
    pub fn add_recipient(
        &mut self,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<&mut Self, NotificationError> {
        let username = checked(Field::RecipientUsername, username.into())?;
        let email = checked(Field::RecipientEmail, email.into())?;
        self.notification
            .recipients
            .push(Recipient { username, email });
        Ok(self)
    }

    /// Expires the notification at the start of `date` (UTC).
    pub fn set_expiration_date(&mut self, date: NaiveDate) -> Result<&mut Self, NotificationError> {
        self.set_expires_at(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// # Summary
    /// Expires the notification at an exact instant.
    ///
    /// # Invariants
    /// - Rejects instants later than `now + 30 days`; past instants are accepted.
    pub fn set_expires_at(
        &mut self,
        expires_at: DateTime<Utc>,
    ) -> Result<&mut Self, NotificationError> {
        let latest = latest_expiry(self.clock.now());
        if expires_at > latest {
            debug!(%expires_at, %latest, "rejected expiration beyond window");
            return Err(NotificationError::Range {
                expires_at,
                max_days: MAX_EXPIRATION_DAYS,
            });
        }
        self.notification.expires_at = expires_at;
        Ok(self)
    }

    pub fn flag_as_urgent(&mut self) -> &mut Self {
        self.notification.priority = Priority::Urgent;
        self
    }

    /// Read-only view of the notification being assembled.
    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn build(self) -> Notification {
        self.notification
    }
}

impl fmt::Debug for NotificationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationBuilder")
            .field("notification", &self.notification)
            .finish_non_exhaustive()
    }
}

impl Default for NotificationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn checked(field: Field, value: String) -> Result<String, NotificationError> {
    match field.length_if_over(&value) {
        Some(actual) => {
            debug!(%field, actual, max = field.max_length(), "rejected over-length value");
            Err(NotificationError::Length {
                field,
                max: field.max_length(),
                actual,
            })
        }
        None => Ok(value),
    }
}
