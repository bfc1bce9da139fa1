//! Wall-clock helpers.
//!
//! All timestamps in this crate are milliseconds since the Unix epoch, the
//! same unit the remote source uses for its `lastUpdate` cursor.

use std::time::Duration;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

/// Convert a duration to milliseconds, saturating at `i64::MAX`.
pub fn duration_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn test_duration_millis() {
        assert_eq!(duration_millis(Duration::ZERO), 0);
        assert_eq!(duration_millis(Duration::from_secs(10)), 10_000);
        assert_eq!(duration_millis(Duration::MAX), i64::MAX);
    }
}
