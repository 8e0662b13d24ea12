//! Foreground-app and usage-time data source.
//!
//! [`DesktopSource`] is the host implementation: it asks the platform probe
//! which application is in front and keeps a per-day usage ledger in SQLite,
//! attributing the wall-clock time between two probes to the app that was in
//! front during that time.

use crate::db::samples::Samples;
use crate::libs::app::AppId;
use crate::libs::clock::{local_date, Clock, SystemClock};
use crate::libs::error::WardenResult;
use crate::platform::{self, ForegroundProbe};
use std::sync::Arc;
use tracing::{debug, warn};

/// Where the monitor learns what the user is doing.
pub trait UsageSource: Send {
    /// Identifier of the most recently foregrounded application.
    ///
    /// `Ok(None)` means nothing identifiable is in front. An error fails the
    /// current tick.
    fn resolve_foreground_app(&mut self) -> WardenResult<Option<AppId>>;

    /// Cumulative foreground time today in milliseconds.
    ///
    /// Never fails: an unavailable source reports `0`.
    fn query_usage_today(&mut self, id: &str) -> i64;
}

/// Desktop implementation backed by a platform probe and the sample ledger.
pub struct DesktopSource {
    probe: Box<dyn ForegroundProbe>,
    samples: Samples,
    clock: Arc<dyn Clock>,
    max_gap_ms: i64,
    last: Option<(AppId, i64)>,
}

impl DesktopSource {
    /// Source using the probe for the current platform and the host clock.
    pub fn new(samples: Samples, max_gap_ms: i64) -> Self {
        Self::with_probe(platform::probe(), samples, Arc::new(SystemClock), max_gap_ms)
    }

    pub fn with_probe(probe: Box<dyn ForegroundProbe>, samples: Samples, clock: Arc<dyn Clock>, max_gap_ms: i64) -> Self {
        Self {
            probe,
            samples,
            clock,
            max_gap_ms,
            last: None,
        }
    }

    /// Credits the time since the previous probe to the app seen then.
    fn record_interval(&mut self, now_ms: i64) -> WardenResult<()> {
        if let Some((app, since)) = self.last.take() {
            let gap = now_ms - since;
            if gap <= 0 {
                return Ok(());
            }
            if gap > self.max_gap_ms {
                debug!(app = %app, gap_ms = gap, "dropping usage sample gap");
                return Ok(());
            }
            // Intervals crossing midnight are credited to the day they end in.
            self.samples.add(local_date(now_ms), &app, gap)?;
        }
        Ok(())
    }
}

impl UsageSource for DesktopSource {
    fn resolve_foreground_app(&mut self) -> WardenResult<Option<AppId>> {
        let now = self.clock.now_ms();
        let current = self.probe.foreground_app()?;
        self.record_interval(now)?;
        self.last = current.clone().map(|app| (app, now));
        Ok(current)
    }

    fn query_usage_today(&mut self, id: &str) -> i64 {
        let today = local_date(self.clock.now_ms());
        match self.samples.usage_on(today, id) {
            Ok(ms) => ms,
            Err(e) => {
                warn!(app = id, error = %e, "usage query failed, reporting zero");
                0
            }
        }
    }
}
