use chrono::{DateTime, Utc};
use std::sync::RwLock;

/// # Summary
/// Clock interface that isolates the system wall clock.
/// Expiry defaults and expiry bounds are always measured against this source.
pub trait TimeProvider: Send + Sync {
    /// Current instant according to this clock.
    fn now(&self) -> DateTime<Utc>;
}

/// # Summary
/// Real clock, returns the operating system's current time.
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    #[allow(clippy::disallowed_methods)]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// # Summary
/// Fixed clock for tests, can be moved forward or backward explicitly.
///
/// # Invariants
/// - Thread safe: the instant is guarded by a `RwLock`.
/// - A poisoned lock still yields the last written instant.
pub struct FakeClockProvider {
    current_time: RwLock<DateTime<Utc>>,
}

impl FakeClockProvider {
    /// Creates a clock pinned to `initial_time`.
    pub fn new(initial_time: DateTime<Utc>) -> Self {
        Self {
            current_time: RwLock::new(initial_time),
        }
    }

    /// Moves the clock to `new_time`.
    pub fn set_time(&self, new_time: DateTime<Utc>) {
        let mut time = self
            .current_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *time = new_time;
    }
}

impl TimeProvider for FakeClockProvider {
    fn now(&self) -> DateTime<Utc> {
        *self
            .current_time
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_fake_clock_set_time() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let clock = FakeClockProvider::new(start);
        assert_eq!(clock.now(), start);

        clock.set_time(start + Duration::days(2));
        assert_eq!(clock.now(), start + Duration::days(2));
    }
}
