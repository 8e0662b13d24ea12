//! The usage monitor loop.
//!
//! A [`Monitor`] owns every piece of tracking state and runs as a single
//! tokio task. Each tick it resolves the foreground application, refreshes
//! that app's usage, runs the policy, persists the resulting state and only
//! then dispatches notifications. Ticks are recovery points: a failing tick
//! is logged and counted, the next one is delayed exponentially, and after
//! `max_failures` consecutive failures the loop stops for good.
//!
//! ```text
//! tick ─▶ foreground (cache | source) ─▶ end previous session on switch
//!      ─▶ enabled app? ─▶ blocked? re-show block screen
//!      ─▶ refresh usage ─▶ policy::evaluate ─▶ save ─▶ effects
//!      ─▶ day rollover
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use appwarden::db::apps::Apps;
//! use appwarden::db::db::Db;
//! use appwarden::db::samples::Samples;
//! use appwarden::libs::config::Config;
//! use appwarden::libs::effects::DesktopEffects;
//! use appwarden::libs::monitor::Monitor;
//! use appwarden::libs::source::DesktopSource;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::read()?;
//! let conn = Db::new()?.shared();
//! let monitor = Monitor::from_config(
//!     &config,
//!     Box::new(Apps::from_shared(conn.clone())),
//!     Box::new(DesktopSource::new(Samples::from_shared(conn), 60_000)),
//!     Box::new(DesktopEffects::new(false)),
//! );
//! let handle = monitor.start();
//! let outcome = handle.stop().await;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

use crate::libs::app::{AppId, MonitoredApp};
use crate::libs::cache::Cached;
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::config::{Config, MonitorConfig};
use crate::libs::effects::Effects;
use crate::libs::error::WardenResult;
use crate::libs::policy::{self, Action, Thresholds};
use crate::libs::source::UsageSource;
use crate::libs::store::AppStore;
use crate::libs::wake_lock::{WakeGuard, WakeLock};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// How a monitor run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Stopped on request.
    Stopped,
    /// Gave up after too many consecutive failing ticks.
    FailStopped { failures: u32 },
    /// The task panicked.
    Crashed(String),
}

/// Delay before the next tick after `failures` consecutive failures:
/// `base * 2^failures`, saturating.
pub fn backoff_delay(base: Duration, failures: u32) -> Duration {
    let factor = 1u32.checked_shl(failures).unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}

pub struct Monitor {
    config: MonitorConfig,
    thresholds: Thresholds,
    store: Box<dyn AppStore>,
    source: Box<dyn UsageSource>,
    effects: Box<dyn Effects>,
    clock: Arc<dyn Clock>,
    wake_lock: Option<Box<dyn WakeLock>>,
    foreground: Cached<Option<AppId>>,
    apps: Cached<Vec<MonitoredApp>>,
    last_app: Option<AppId>,
    failures: u32,
}

impl Monitor {
    pub fn new(
        config: MonitorConfig,
        thresholds: Thresholds,
        store: Box<dyn AppStore>,
        source: Box<dyn UsageSource>,
        effects: Box<dyn Effects>,
    ) -> Self {
        let foreground = Cached::new(ttl(config.foreground_cache_ttl));
        let apps = Cached::new(ttl(config.apps_cache_ttl));
        Self {
            config,
            thresholds,
            store,
            source,
            effects,
            clock: Arc::new(SystemClock),
            wake_lock: None,
            foreground,
            apps,
            last_app: None,
            failures: 0,
        }
    }

    /// Monitor with the monitor and limit sections of `config`.
    pub fn from_config(config: &Config, store: Box<dyn AppStore>, source: Box<dyn UsageSource>, effects: Box<dyn Effects>) -> Self {
        let thresholds = Thresholds::from(&config.limits_or_default());
        Self::new(config.monitor_or_default(), thresholds, store, source, effects)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Wake lock held for the lifetime of [`Monitor::run`].
    pub fn with_wake_lock(mut self, lock: Box<dyn WakeLock>) -> Self {
        self.wake_lock = Some(lock);
        self
    }

    /// Foreground application observed on the last successful switch.
    pub fn last_app(&self) -> Option<&str> {
        self.last_app.as_deref()
    }

    /// Runs one monitoring pass.
    pub fn tick(&mut self) -> WardenResult<()> {
        let now = self.clock.now_ms();
        let foreground = self.current_foreground(now)?;

        if foreground != self.last_app {
            if let Some(previous) = self.last_app.clone() {
                self.end_previous_session(&previous, now)?;
            }
            debug!(from = ?self.last_app, to = ?foreground, "foreground changed");
            self.last_app = foreground.clone();
        }

        if let Some(id) = foreground {
            self.check_app_usage(&id, now)?;
        }

        self.reset_if_new_day()
    }

    /// Runs until stopped or until the failure budget is spent.
    pub async fn run(mut self, mut stop: watch::Receiver<bool>) -> RunOutcome {
        let _guard = self.wake_lock.take().map(WakeGuard::acquire);
        let base = Duration::from_millis(self.config.poll_interval.max(1));
        info!(poll_ms = self.config.poll_interval, "usage monitor started");

        loop {
            if *stop.borrow() {
                info!("usage monitor stopped");
                return RunOutcome::Stopped;
            }

            match self.tick() {
                Ok(()) => {
                    if self.failures > 0 {
                        info!(failures = self.failures, "usage monitor recovered");
                    }
                    self.failures = 0;
                }
                Err(e) => {
                    self.failures += 1;
                    warn!(failures = self.failures, kind = e.label(), error = %e, "monitor tick failed");
                    if self.failures >= self.config.max_failures {
                        error!(failures = self.failures, "too many consecutive failures, stopping usage monitor");
                        return RunOutcome::FailStopped { failures: self.failures };
                    }
                }
            }

            let delay = backoff_delay(base, self.failures);
            if self.failures > 0 {
                debug!(delay_ms = delay.as_millis() as u64, "backing off");
            }

            let changed = tokio::select! {
                _ = tokio::time::sleep(delay) => None,
                changed = stop.changed() => Some(changed.is_ok()),
            };
            // A closed channel means the handle is gone.
            if changed == Some(false) || *stop.borrow() {
                info!("usage monitor stopped");
                return RunOutcome::Stopped;
            }
        }
    }

    /// Spawns [`Monitor::run`] on the tokio runtime.
    pub fn start(self) -> MonitorHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(stop_rx));
        MonitorHandle { stop_tx, task: Some(task) }
    }

    fn current_foreground(&mut self, now: i64) -> WardenResult<Option<AppId>> {
        if let Some(cached) = self.foreground.get(now) {
            return Ok(cached.clone());
        }
        let app = self.source.resolve_foreground_app()?;
        self.foreground.put(app.clone(), now);
        Ok(app)
    }

    fn refresh_apps(&mut self, now: i64) -> WardenResult<()> {
        let fresh = self.apps.get(now).is_some_and(|apps| !apps.is_empty());
        if !fresh {
            let apps = self.store.enabled_apps()?;
            debug!(count = apps.len(), "refreshed enabled apps");
            self.apps.put(apps, now);
        }
        Ok(())
    }

    fn cached_app(&self, id: &str, now: i64) -> Option<MonitoredApp> {
        self.apps.get(now)?.iter().find(|app| app.id == id).cloned()
    }

    fn write_through(&mut self, app: &MonitoredApp, now: i64) {
        if let Some(cached) = self.apps.get_mut(now).and_then(|apps| apps.iter_mut().find(|a| a.id == app.id)) {
            *cached = app.clone();
        }
    }

    /// Clears the session of the app that just lost the foreground.
    fn end_previous_session(&mut self, id: &str, now: i64) -> WardenResult<()> {
        let previous = match self.cached_app(id, now) {
            Some(app) => Some(app),
            None => self.store.get(id)?,
        };
        let Some(mut app) = previous else {
            return Ok(());
        };
        if !app.in_session() {
            return Ok(());
        }

        app.end_session();
        self.store.update_continuous_state(&app.id, 0, 0)?;
        self.write_through(&app, now);
        debug!(app = %app.id, "continuous session ended");
        Ok(())
    }

    fn check_app_usage(&mut self, id: &str, now: i64) -> WardenResult<()> {
        self.refresh_apps(now)?;
        let Some(mut app) = self.cached_app(id, now) else {
            return Ok(());
        };

        if app.is_blocked(now) {
            self.effects.present_block_screen(&app.id, &app.display_name, app.blocked_until_ms);
            return Ok(());
        }

        let usage = self.source.query_usage_today(&app.id);
        if app.refresh_usage(usage) {
            self.store.update_usage(&app.id, app.usage_today_ms)?;
        }

        let before = app.clone();
        let actions = policy::evaluate(&mut app, now, &self.thresholds);
        if app != before {
            self.store.save_tracking(&app)?;
        }
        self.write_through(&app, now);

        for action in actions {
            self.dispatch(&app, action);
        }
        Ok(())
    }

    fn dispatch(&self, app: &MonitoredApp, action: Action) {
        match action {
            Action::Warn { ordinal, total } => {
                self.effects.notify_warning(&app.display_name, ordinal, total);
            }
            Action::LimitReached { reason } => {
                info!(app = %app.id, %reason, until = app.blocked_until_ms, "blocking app");
                self.effects.notify_limit_reached(&app.display_name);
            }
            Action::ShowBlockScreen { until_ms } => {
                self.effects.present_block_screen(&app.id, &app.display_name, until_ms);
            }
        }
    }

    fn reset_if_new_day(&mut self) -> WardenResult<()> {
        let day_start = self.clock.day_start_ms();
        let reset = self.store.reset_stale_usage(day_start)?;
        if reset > 0 {
            info!(apps = reset, "new day, usage counters reset");
            self.apps.invalidate();
        }
        Ok(())
    }
}

fn ttl(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}

/// Control over a spawned monitor.
///
/// Dropping the handle also stops the monitor.
pub struct MonitorHandle {
    stop_tx: watch::Sender<bool>,
    task: Option<JoinHandle<RunOutcome>>,
}

impl MonitorHandle {
    /// Asks the loop to stop; an in-flight tick completes first.
    pub fn stop_signal(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// Waits for the loop to end. Safe to cancel and call again.
    pub async fn join(&mut self) -> RunOutcome {
        let Some(task) = self.task.as_mut() else {
            return RunOutcome::Stopped;
        };
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => RunOutcome::Crashed(e.to_string()),
        };
        self.task = None;
        outcome
    }

    /// Stops the loop and waits for it.
    pub async fn stop(mut self) -> RunOutcome {
        self.stop_signal();
        self.join().await
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }
}
