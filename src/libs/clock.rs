//! Wall-clock access for the monitor.

use chrono::{Local, LocalResult, NaiveDate, TimeZone};

/// Source of "now" in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;

    /// Start of the local calendar day containing `now_ms()`.
    fn day_start_ms(&self) -> i64 {
        local_day_start_ms(self.now_ms())
    }
}

/// The host clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// Local calendar date of an epoch timestamp.
pub fn local_date(ms: i64) -> NaiveDate {
    match Local.timestamp_millis_opt(ms) {
        LocalResult::Single(dt) => dt.date_naive(),
        LocalResult::Ambiguous(dt, _) => dt.date_naive(),
        LocalResult::None => Local::now().date_naive(),
    }
}

/// Epoch milliseconds of local midnight on `date`.
///
/// Days that start inside a DST gap fall back to the first valid instant.
pub fn date_start_ms(date: NaiveDate) -> i64 {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    match Local.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.timestamp_millis(),
        None => {
            let shifted = midnight + chrono::Duration::hours(1);
            Local
                .from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.timestamp_millis())
                .unwrap_or_else(|| shifted.and_utc().timestamp_millis())
        }
    }
}

/// Epoch milliseconds of the start of the local day containing `ms`.
pub fn local_day_start_ms(ms: i64) -> i64 {
    date_start_ms(local_date(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_start_is_not_after_now() {
        let now = SystemClock.now_ms();
        let start = SystemClock.day_start_ms();
        assert!(start <= now);
        assert!(now - start < 25 * 3_600_000);
        assert_eq!(local_date(start), local_date(now));
    }
}
