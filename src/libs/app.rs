//! The monitored application record and its state transitions.
//!
//! A [`MonitoredApp`] carries both the user's policy (daily limit, enabled
//! flag) and the tracking state the monitor maintains every tick (usage
//! today, continuous session, warnings, block window). Tracking state is
//! only changed through the named transition methods below so related
//! fields always move together: ending a session always clears its warning
//! counter, blocking always ends the session, and a day reset clears every
//! counter at once.
//!
//! All timestamps are milliseconds since the Unix epoch.

use serde::{Deserialize, Serialize};

/// Application identifier (package name, bundle name or process name).
pub type AppId = String;

/// Milliseconds in one minute.
pub const MINUTE_MS: i64 = 60_000;

/// Largest accepted daily limit: a whole day.
pub const MAX_DAILY_LIMIT_MINUTES: u32 = 24 * 60;

/// One application under usage policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredApp {
    /// Stable unique key.
    pub id: AppId,
    /// Human readable label, informational only.
    pub display_name: String,
    /// Daily cap in minutes; `0` disables the cap.
    pub daily_limit_minutes: u32,
    /// Disabled records are kept but not monitored.
    pub enabled: bool,
    /// Start of the usage day the counters below belong to.
    pub last_reset_ms: i64,
    /// Cumulative foreground time since `last_reset_ms`.
    pub usage_today_ms: i64,
    /// Start of the current continuous session, `0` when idle.
    pub continuous_start_ms: i64,
    /// Warnings delivered during the current session.
    pub warnings_sent: u32,
    /// End of the block window, `0` when not blocked.
    pub blocked_until_ms: i64,
}

/// Where an application currently sits in the continuous-usage machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No continuous session in progress.
    Idle,
    /// Foreground session in progress with `warnings` already delivered.
    Tracking { started_ms: i64, warnings: u32 },
    /// Denied foreground use until the given timestamp.
    Blocked { until_ms: i64 },
}

impl MonitoredApp {
    /// Creates a fresh, enabled record with empty counters.
    pub fn new(id: impl Into<AppId>, display_name: impl Into<String>, daily_limit_minutes: u32, now_ms: i64) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            daily_limit_minutes,
            enabled: true,
            last_reset_ms: now_ms,
            usage_today_ms: 0,
            continuous_start_ms: 0,
            warnings_sent: 0,
            blocked_until_ms: 0,
        }
    }

    /// Daily cap in milliseconds, `None` when the app has no cap.
    pub fn daily_limit_ms(&self) -> Option<i64> {
        match self.daily_limit_minutes {
            0 => None,
            minutes => Some(i64::from(minutes) * MINUTE_MS),
        }
    }

    pub fn is_blocked(&self, now_ms: i64) -> bool {
        self.blocked_until_ms > now_ms
    }

    pub fn in_session(&self) -> bool {
        self.continuous_start_ms != 0
    }

    /// Elapsed continuous usage, `0` when idle.
    pub fn session_elapsed_ms(&self, now_ms: i64) -> i64 {
        if self.in_session() {
            (now_ms - self.continuous_start_ms).max(0)
        } else {
            0
        }
    }

    pub fn over_daily_limit(&self) -> bool {
        self.daily_limit_ms().is_some_and(|limit| self.usage_today_ms >= limit)
    }

    /// Remaining block time, `0` when not blocked.
    pub fn block_remaining_ms(&self, now_ms: i64) -> i64 {
        (self.blocked_until_ms - now_ms).max(0)
    }

    pub fn state(&self, now_ms: i64) -> SessionState {
        if self.is_blocked(now_ms) {
            SessionState::Blocked { until_ms: self.blocked_until_ms }
        } else if self.in_session() {
            SessionState::Tracking {
                started_ms: self.continuous_start_ms,
                warnings: self.warnings_sent,
            }
        } else {
            SessionState::Idle
        }
    }

    /// `Idle -> Tracking`.
    pub fn begin_session(&mut self, now_ms: i64) {
        self.continuous_start_ms = now_ms;
        self.warnings_sent = 0;
    }

    /// Back to `Idle`; the warning counter always goes with the session.
    pub fn end_session(&mut self) {
        self.continuous_start_ms = 0;
        self.warnings_sent = 0;
    }

    /// Records one more delivered warning and returns its ordinal.
    pub fn record_warning(&mut self) -> u32 {
        self.warnings_sent += 1;
        self.warnings_sent
    }

    /// Starts a block window and ends the running session.
    pub fn block_until(&mut self, until_ms: i64) {
        self.blocked_until_ms = until_ms;
        self.end_session();
    }

    /// Takes a fresh usage reading. Usage never goes backwards within a day.
    /// Returns `true` when the stored value changed.
    pub fn refresh_usage(&mut self, usage_ms: i64) -> bool {
        let usage_ms = usage_ms.max(self.usage_today_ms);
        let changed = usage_ms != self.usage_today_ms;
        self.usage_today_ms = usage_ms;
        changed
    }
}

/// Accepts a daily limit of at most a whole day.
pub fn validate_limit(minutes: u32) -> crate::libs::error::WardenResult<u32> {
    if minutes > MAX_DAILY_LIMIT_MINUTES {
        return Err(crate::libs::error::WardenError::InvalidLimit(i64::from(minutes)));
    }
    Ok(minutes)
}
