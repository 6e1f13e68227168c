use std::sync::Arc;

use crate::common::time::{RealTimeProvider, TimeProvider};
use crate::notification::builder::latest_expiry;
use crate::notification::entity::{
    Field, MAX_EXPIRATION_DAYS, Notification, Recipient, ValidatedNotification,
};
use crate::notification::error::ValidationError;

/// # Summary
/// Outcome of one validation pass.
///
/// # Invariants
/// - Owned by the caller; nothing is shared with the validator or other results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    /// True when no violation was recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Violation messages in check order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

/// # Summary
/// Final gate before transport: re-checks a complete notification and
/// reports every violation instead of stopping at the first.
///
/// # Invariants
/// - Stateless: `validate` takes `&self` and returns a fresh result each call.
/// - Uses the same limits as `NotificationBuilder` (`Field::max_length`).
/// - The expiry bound is measured against the clock at validation time.
pub struct NotificationValidator {
    clock: Arc<dyn TimeProvider>,
}

impl NotificationValidator {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(RealTimeProvider))
    }

    pub fn with_clock(clock: Arc<dyn TimeProvider>) -> Self {
        Self { clock }
    }

    /// # Summary
    /// Validates every constraint of `notification`.
    ///
    /// # Logic
    /// 1. Text field lengths: title, summary, SMS description, primary URL,
    ///    secondary URL, type, reply-to.
    /// 2. Expiry not beyond `now + 30 days`.
    /// 3. At least one recipient.
    /// 4. Username and email length of each recipient, in order.
    ///
    /// # Returns
    /// A `ValidationResult` holding all violations found.
    pub fn validate(&self, notification: &Notification) -> ValidationResult {
        let mut errors = Vec::new();

        let text_fields = [
            (Field::Title, notification.title()),
            (Field::Summary, notification.summary()),
            (Field::SmsDescription, notification.sms_description()),
            (Field::PrimaryActionUrl, notification.primary_action_url()),
            (Field::SecondaryActionUrl, notification.secondary_action_url()),
            (Field::Type, notification.notification_type()),
            (Field::ReplyTo, notification.reply_to()),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                check_length(&mut errors, field, value);
            }
        }

        let latest = latest_expiry(self.clock.now());
        if notification.expires_at() > latest {
            errors.push(format!(
                "expiration date {} exceeds max expiration time of {} days",
                notification.expires_at(),
                MAX_EXPIRATION_DAYS
            ));
        }

        if notification.recipients().is_empty() {
            errors.push("No recipients set for notification".to_string());
        }
        for Recipient { username, email } in notification.recipients() {
            check_length(&mut errors, Field::RecipientUsername, username);
            check_length(&mut errors, Field::RecipientEmail, email);
        }

        ValidationResult { errors }
    }

    /// # Summary
    /// Validates and, on success, marks the notification as ready for transport.
    ///
    /// # Returns
    /// * `Ok(ValidatedNotification)` when no violation was found.
    /// * `Err(ValidationError)` carrying every violation otherwise.
    pub fn check(&self, notification: Notification) -> Result<ValidatedNotification, ValidationError> {
        self.validate(&notification).into_result()?;
        Ok(ValidatedNotification::new(notification))
    }
}

impl Default for NotificationValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn check_length(errors: &mut Vec<String>, field: Field, value: &str) {
    if field.length_if_over(value).is_some() {
        errors.push(format!(
            "{} \"{}\" exceeds max length of {} characters",
            field,
            value,
            field.max_length()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::FakeClockProvider;
    use crate::notification::entity::Priority;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 14, 0, 0).unwrap()
    }

    fn validator() -> NotificationValidator {
        NotificationValidator::with_clock(Arc::new(FakeClockProvider::new(fixed_now())))
    }

    // Bypasses the builder so the validator sees values the setters would reject.
    fn raw(recipients: Vec<Recipient>) -> Notification {
        let mut n = Notification::empty(fixed_now() + Duration::days(5));
        n.recipients = recipients;
        n
    }

    fn jdoe() -> Recipient {
        Recipient {
            username: "jdoe".to_string(),
            email: "jdoe@iu.edu".to_string(),
        }
    }

    #[test]
    fn test_valid_notification() {
        let mut n = raw(vec![jdoe()]);
        n.title = Some("Outage".to_string());
        let result = validator().validate(&n);
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_no_recipients_always_reported() {
        let result = validator().validate(&raw(vec![]));
        assert!(!result.is_valid());
        assert_eq!(result.errors(), ["No recipients set for notification"]);
    }

    #[test]
    fn test_long_title_without_recipients_yields_two_errors() {
        let mut n = raw(vec![]);
        n.title = Some("x".repeat(60));
        let result = validator().validate(&n);
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 2);
        assert!(result.errors()[0].starts_with("notification title"));
        assert!(result.errors()[0].contains("max length of 50"));
        assert_eq!(result.errors()[1], "No recipients set for notification");
    }

    #[test]
    fn test_reports_all_violations_in_check_order() {
        let mut n = raw(vec![Recipient {
            username: "u".repeat(101),
            email: "e".repeat(101),
        }]);
        n.title = Some("t".repeat(51));
        n.summary = Some("s".repeat(101));
        n.sms_description = Some("m".repeat(401));
        n.primary_action_url = Some("p".repeat(2001));
        n.secondary_action_url = Some("q".repeat(2001));
        n.notification_type = Some("k".repeat(101));
        n.reply_to = Some("r".repeat(101));
        n.expires_at = fixed_now() + Duration::days(31);
        n.priority = Priority::Urgent;

        let errors = validator().validate(&n).errors().to_vec();
        assert_eq!(errors.len(), 10);
        assert!(errors[0].starts_with("notification title"));
        assert!(errors[1].starts_with("notification summary"));
        assert!(errors[2].starts_with("notification SMS description"));
        assert!(errors[3].starts_with("notification primary action URL"));
        assert!(errors[4].starts_with("notification secondary action URL"));
        assert!(errors[5].starts_with("notification type name"));
        assert!(errors[6].starts_with("notification reply-to email address"));
        assert!(errors[7].contains("max expiration time of 30 days"));
        assert!(errors[8].starts_with("recipient username"));
        assert!(errors[9].starts_with("recipient email address"));
    }

    #[test]
    fn test_recipient_checks_run_per_recipient_in_order() {
        let n = raw(vec![
            Recipient {
                username: "a".repeat(101),
                email: "b".repeat(101),
            },
            jdoe(),
            Recipient {
                username: "c".repeat(101),
                email: "d".repeat(101),
            },
        ]);

        let errors = validator().validate(&n).errors().to_vec();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].starts_with(&format!("recipient username \"{}\"", "a".repeat(101))));
        assert!(errors[1].starts_with(&format!("recipient email address \"{}\"", "b".repeat(101))));
        assert!(errors[2].starts_with(&format!("recipient username \"{}\"", "c".repeat(101))));
        assert!(errors[3].starts_with(&format!("recipient email address \"{}\"", "d".repeat(101))));
    }

    #[test]
    fn test_clock_near_end_of_range_does_not_panic() {
        let edge = DateTime::<Utc>::MAX_UTC - Duration::days(1);
        let validator = NotificationValidator::with_clock(Arc::new(FakeClockProvider::new(edge)));
        let mut n = raw(vec![jdoe()]);
        n.expires_at = DateTime::<Utc>::MAX_UTC;

        assert!(validator.validate(&n).is_valid());
    }

    #[test]
    fn test_validate_is_stateless() {
        let validator = validator();
        let bad = raw(vec![]);
        let good = raw(vec![jdoe()]);

        assert!(!validator.validate(&bad).is_valid());
        let first = validator.validate(&good);
        let second = validator.validate(&good);
        assert!(first.is_valid());
        assert!(second.is_valid());
        assert_eq!(first, second);
    }

    #[test]
    fn test_expiry_measured_at_validation_time() {
        let clock = Arc::new(FakeClockProvider::new(fixed_now()));
        let validator = NotificationValidator::with_clock(clock.clone());
        let mut n = raw(vec![jdoe()]);
        n.expires_at = fixed_now() + Duration::days(35);

        assert!(!validator.validate(&n).is_valid());
        clock.set_time(fixed_now() + Duration::days(5));
        assert!(validator.validate(&n).is_valid());
    }

    #[test]
    fn test_check_returns_typestate() {
        let validator = validator();
        let validated = validator.check(raw(vec![jdoe()])).unwrap();
        assert_eq!(validated.as_notification().recipients(), [jdoe()]);

        let err = validator.check(raw(vec![])).unwrap_err();
        assert_eq!(err.errors(), ["No recipients set for notification"]);
    }
}
