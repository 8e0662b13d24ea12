//! Outbound notifications and the block screen.
//!
//! Effects are fire-and-forget: the monitor has already persisted the state
//! change before calling them and never waits on the user.

use crate::libs::clock::{Clock, SystemClock};
use crate::libs::formatter::format_countdown;
use crate::libs::messages::Message;
use crate::platform;
use crate::{msg_error, msg_warning};
use std::sync::Arc;
use tracing::{info, warn};

/// Capabilities the monitor uses to reach the user.
pub trait Effects: Send {
    /// `ordinal` of `total` continuous-use warnings for `app_name`.
    fn notify_warning(&self, app_name: &str, ordinal: u32, total: u32);

    /// The app has just been blocked.
    fn notify_limit_reached(&self, app_name: &str);

    /// Shows (or re-shows) the block screen until `blocked_until_ms`.
    fn present_block_screen(&self, app_id: &str, app_name: &str, blocked_until_ms: i64);
}

/// Terminal/log effects with optional termination of blocked processes.
pub struct DesktopEffects {
    clock: Arc<dyn Clock>,
    terminate_blocked: bool,
}

impl DesktopEffects {
    pub fn new(terminate_blocked: bool) -> Self {
        Self::with_clock(Arc::new(SystemClock), terminate_blocked)
    }

    pub fn with_clock(clock: Arc<dyn Clock>, terminate_blocked: bool) -> Self {
        Self { clock, terminate_blocked }
    }
}

impl Effects for DesktopEffects {
    fn notify_warning(&self, app_name: &str, ordinal: u32, total: u32) {
        info!(app = app_name, ordinal, total, "continuous usage warning");
        msg_warning!(Message::ContinuousUsageWarning {
            app: app_name.to_string(),
            ordinal,
            total,
        });
    }

    fn notify_limit_reached(&self, app_name: &str) {
        info!(app = app_name, "usage limit reached");
        msg_error!(Message::UsageLimitReached(app_name.to_string()));
    }

    fn present_block_screen(&self, app_id: &str, app_name: &str, blocked_until_ms: i64) {
        let remaining = (blocked_until_ms - self.clock.now_ms()).max(0);
        msg_error!(Message::AppBlocked {
            app: app_name.to_string(),
            remaining: format_countdown(remaining),
        });

        if self.terminate_blocked {
            let killed = platform::terminate_by_name(app_id);
            if killed > 0 {
                info!(app = app_id, processes = killed, "terminated blocked app");
            } else {
                warn!(app = app_id, "no running process matched blocked app");
            }
        }
    }
}
