//! Duration formatting for tables and notifications.
//!
//! ## Formats
//!
//! - [`format_duration`]: "HH:MM", used in tables and insights
//! - [`format_usage`]: "1h 05m" style, used for usage against a limit
//! - [`format_countdown`]: "MM:SS" remaining block time, hours folded into
//!   minutes so a one hour block reads "60:00"
//!
//! Negative durations are treated as zero everywhere.
//!
//! ```rust
//! use appwarden::libs::formatter::{format_countdown, format_duration};
//! use chrono::Duration;
//!
//! assert_eq!(format_duration(&Duration::minutes(90)), "01:30");
//! assert_eq!(format_countdown(3_600_000), "60:00");
//! ```

use chrono::Duration;

/// Formats a duration as "HH:MM".
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Formats milliseconds as "HH:MM".
pub fn format_ms(ms: i64) -> String {
    format_duration(&Duration::milliseconds(ms.max(0)))
}

/// Formats milliseconds as "1h 05m", or "5m" under an hour.
pub fn format_usage(ms: i64) -> String {
    let minutes = ms.max(0) / 60_000;
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, m) => format!("{h}h {m:02}m"),
    }
}

/// Formats remaining milliseconds as a "MM:SS" countdown, rounding seconds up.
pub fn format_countdown(ms: i64) -> String {
    let seconds = (ms.max(0) + 999) / 1000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
