//! Threshold evaluation for the continuous-usage state machine.
//!
//! The monitor calls [`evaluate`] once per tick for the foreground app, after
//! the block check and the usage refresh. Evaluation mutates the record
//! through its transition methods and returns the effects the monitor has to
//! dispatch, so the rules can be exercised without a store or a UI.
//!
//! ```text
//!   Idle ──foreground──▶ Tracking(0) ──1h──▶ Tracking(1) ──2h──▶ Tracking(2)
//!    ▲                                                             │ 3h
//!    │                                                             ▼
//!    └──── now >= blocked_until ◀──── Blocked ◀──next tick── Tracking(3)
//!
//!   any state ──usage_today >= daily limit──▶ Blocked
//! ```

use crate::libs::app::{MonitoredApp, MINUTE_MS};
use crate::libs::config::LimitsConfig;

/// Warning and block thresholds for continuous usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Continuous time between two warnings (first warning after one interval).
    pub warning_interval_ms: i64,
    /// Warnings delivered before a continuous-use block.
    pub total_warnings: u32,
    /// Length of every block window.
    pub block_duration_ms: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_interval_ms: 60 * MINUTE_MS,
            total_warnings: 3,
            block_duration_ms: 60 * MINUTE_MS,
        }
    }
}

impl From<&LimitsConfig> for Thresholds {
    fn from(config: &LimitsConfig) -> Self {
        Self {
            warning_interval_ms: i64::from(config.warning_interval_minutes.max(1)) * MINUTE_MS,
            total_warnings: config.total_warnings.max(1),
            block_duration_ms: i64::from(config.block_minutes.max(1)) * MINUTE_MS,
        }
    }
}

impl Thresholds {
    /// Warnings that should have been delivered after `elapsed_ms` of
    /// continuous use.
    pub fn warnings_due(&self, elapsed_ms: i64) -> u32 {
        if elapsed_ms <= 0 {
            return 0;
        }
        let due = elapsed_ms / self.warning_interval_ms;
        u32::try_from(due).unwrap_or(u32::MAX).min(self.total_warnings)
    }

    /// Continuous duration after which an app that ignored every warning is blocked.
    pub fn block_after_ms(&self) -> i64 {
        self.warning_interval_ms * i64::from(self.total_warnings)
    }
}

/// Why an app got blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    DailyLimit,
    ContinuousUse,
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockReason::DailyLimit => write!(f, "daily time limit reached"),
            BlockReason::ContinuousUse => write!(f, "ignored all warnings after continuous usage"),
        }
    }
}

/// Outbound effect produced by an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Warn { ordinal: u32, total: u32 },
    LimitReached { reason: BlockReason },
    ShowBlockScreen { until_ms: i64 },
}

/// Runs the daily-limit check and the continuous-usage machine for the
/// foreground app. The caller must have already skipped blocked apps.
///
/// At most one warning is delivered per call, even when several thresholds
/// were crossed since the previous tick. The continuous-use block is decided
/// on the warning count the app had when the call started, so the final
/// warning is always shown at least one tick before the block.
pub fn evaluate(app: &mut MonitoredApp, now_ms: i64, thresholds: &Thresholds) -> Vec<Action> {
    if app.over_daily_limit() {
        return block(app, now_ms, thresholds, BlockReason::DailyLimit);
    }

    if !app.in_session() {
        app.begin_session(now_ms);
        return Vec::new();
    }

    let elapsed = app.session_elapsed_ms(now_ms);
    let warnings_at_start = app.warnings_sent;
    let mut actions = Vec::new();

    if thresholds.warnings_due(elapsed) > app.warnings_sent && app.warnings_sent < thresholds.total_warnings {
        let ordinal = app.record_warning();
        actions.push(Action::Warn {
            ordinal,
            total: thresholds.total_warnings,
        });
    }

    if warnings_at_start >= thresholds.total_warnings && elapsed >= thresholds.block_after_ms() {
        actions.extend(block(app, now_ms, thresholds, BlockReason::ContinuousUse));
    }

    actions
}

fn block(app: &mut MonitoredApp, now_ms: i64, thresholds: &Thresholds, reason: BlockReason) -> Vec<Action> {
    let until_ms = now_ms + thresholds.block_duration_ms;
    app.block_until(until_ms);
    vec![Action::LimitReached { reason }, Action::ShowBlockScreen { until_ms }]
}
