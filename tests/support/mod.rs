//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use appwarden::db::apps::Apps;
use appwarden::db::db::Db;
use appwarden::libs::app::{AppId, MonitoredApp};
use appwarden::libs::clock::{date_start_ms, Clock};
use appwarden::libs::config::MonitorConfig;
use appwarden::libs::effects::Effects;
use appwarden::libs::error::{WardenError, WardenResult};
use appwarden::libs::monitor::Monitor;
use appwarden::libs::policy::Thresholds;
use appwarden::libs::source::UsageSource;
use appwarden::libs::store::AppStore;
use appwarden::libs::wake_lock::WakeLock;
use appwarden::platform::ForegroundProbe;
use chrono::Local;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

pub const SECOND_MS: i64 = 1_000;
pub const MINUTE_MS: i64 = 60 * SECOND_MS;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;

/// Clock moved by hand, starting today at 06:00 local time.
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn starting_today() -> Arc<Self> {
        let morning = date_start_ms(Local::now().date_naive()) + 6 * HOUR_MS;
        Arc::new(Self { now: AtomicI64::new(morning) })
    }

    pub fn advance(&self, ms: i64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
struct Script {
    foreground: Option<AppId>,
    usage: HashMap<AppId, i64>,
    failures_left: usize,
    resolves: usize,
}

/// Usage source driven by the test; clones share one script.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    script: Arc<Mutex<Script>>,
}

impl ScriptedSource {
    pub fn set_foreground(&self, app: Option<&str>) {
        self.script.lock().foreground = app.map(str::to_string);
    }

    pub fn set_usage(&self, app: &str, ms: i64) {
        self.script.lock().usage.insert(app.to_string(), ms);
    }

    /// Makes the next `count` foreground lookups fail.
    pub fn fail_next(&self, count: usize) {
        self.script.lock().failures_left = count;
    }

    pub fn resolves(&self) -> usize {
        self.script.lock().resolves
    }
}

impl UsageSource for ScriptedSource {
    fn resolve_foreground_app(&mut self) -> WardenResult<Option<AppId>> {
        let mut script = self.script.lock();
        script.resolves += 1;
        if script.failures_left > 0 {
            script.failures_left -= 1;
            return Err(WardenError::Source("scripted failure".to_string()));
        }
        Ok(script.foreground.clone())
    }

    fn query_usage_today(&mut self, id: &str) -> i64 {
        self.script.lock().usage.get(id).copied().unwrap_or(0)
    }
}

/// Foreground probe returning whatever the test last set.
#[derive(Clone, Default)]
pub struct ScriptedProbe {
    app: Arc<Mutex<Option<AppId>>>,
}

impl ScriptedProbe {
    pub fn set(&self, app: Option<&str>) {
        *self.app.lock() = app.map(str::to_string);
    }
}

impl ForegroundProbe for ScriptedProbe {
    fn foreground_app(&mut self) -> WardenResult<Option<AppId>> {
        Ok(self.app.lock().clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Warning { app: String, ordinal: u32, total: u32 },
    LimitReached(String),
    BlockScreen { app_id: String, until_ms: i64 },
}

#[derive(Clone, Default)]
pub struct RecordingEffects {
    log: Arc<Mutex<Vec<Effect>>>,
}

impl RecordingEffects {
    pub fn all(&self) -> Vec<Effect> {
        self.log.lock().clone()
    }

    pub fn take(&self) -> Vec<Effect> {
        std::mem::take(&mut *self.log.lock())
    }

    pub fn warnings(&self) -> Vec<u32> {
        self.all()
            .into_iter()
            .filter_map(|e| match e {
                Effect::Warning { ordinal, .. } => Some(ordinal),
                _ => None,
            })
            .collect()
    }
}

impl Effects for RecordingEffects {
    fn notify_warning(&self, app_name: &str, ordinal: u32, total: u32) {
        self.log.lock().push(Effect::Warning {
            app: app_name.to_string(),
            ordinal,
            total,
        });
    }

    fn notify_limit_reached(&self, app_name: &str) {
        self.log.lock().push(Effect::LimitReached(app_name.to_string()));
    }

    fn present_block_screen(&self, app_id: &str, _app_name: &str, blocked_until_ms: i64) {
        self.log.lock().push(Effect::BlockScreen {
            app_id: app_id.to_string(),
            until_ms: blocked_until_ms,
        });
    }
}

/// Wake lock counting acquisitions and releases.
#[derive(Clone, Default)]
pub struct CountingWakeLock {
    acquired: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
    refuse: bool,
}

impl CountingWakeLock {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl WakeLock for CountingWakeLock {
    fn acquire(&mut self) -> WardenResult<()> {
        if self.refuse {
            return Err(WardenError::WakeLock("refused".to_string()));
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn release(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Store that fails the next few calls, then delegates to an in-memory one.
#[derive(Clone)]
pub struct FlakyStore {
    inner: Apps,
    failures_left: Arc<AtomicUsize>,
}

impl FlakyStore {
    pub fn new(inner: Apps) -> Self {
        Self {
            inner,
            failures_left: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Makes the next `count` store calls fail.
    pub fn fail_next(&self, count: usize) {
        self.failures_left.store(count, Ordering::SeqCst);
    }

    fn check(&self) -> WardenResult<()> {
        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failed {
            return Err(WardenError::Store(rusqlite::Error::InvalidQuery));
        }
        Ok(())
    }
}

impl AppStore for FlakyStore {
    fn get(&self, id: &str) -> WardenResult<Option<MonitoredApp>> {
        self.check()?;
        self.inner.get(id)
    }

    fn all_apps(&self) -> WardenResult<Vec<MonitoredApp>> {
        self.check()?;
        self.inner.all_apps()
    }

    fn enabled_apps(&self) -> WardenResult<Vec<MonitoredApp>> {
        self.check()?;
        self.inner.enabled_apps()
    }

    fn upsert(&self, app: &MonitoredApp) -> WardenResult<()> {
        self.check()?;
        self.inner.upsert(app)
    }

    fn delete(&self, id: &str) -> WardenResult<bool> {
        self.check()?;
        self.inner.delete(id)
    }

    fn update_usage(&self, id: &str, usage_today_ms: i64) -> WardenResult<()> {
        self.check()?;
        self.inner.update_usage(id, usage_today_ms)
    }

    fn update_continuous_state(&self, id: &str, continuous_start_ms: i64, warnings_sent: u32) -> WardenResult<()> {
        self.check()?;
        self.inner.update_continuous_state(id, continuous_start_ms, warnings_sent)
    }

    fn update_block_window(&self, id: &str, blocked_until_ms: i64) -> WardenResult<()> {
        self.check()?;
        self.inner.update_block_window(id, blocked_until_ms)
    }

    fn save_tracking(&self, app: &MonitoredApp) -> WardenResult<()> {
        self.check()?;
        self.inner.save_tracking(app)
    }

    fn reset_stale_usage(&self, day_start_ms: i64) -> WardenResult<usize> {
        self.check()?;
        self.inner.reset_stale_usage(day_start_ms)
    }
}

pub fn memory_store() -> Apps {
    Apps::with_db(Db::open_in_memory().unwrap())
}

/// Adds an enabled app created at the clock's current time.
pub fn add_app(store: &Apps, clock: &ManualClock, id: &str, limit_minutes: u32) -> MonitoredApp {
    let app = MonitoredApp::new(id, id, limit_minutes, clock.now_ms());
    store.upsert(&app).unwrap();
    app
}

/// Monitor over the given doubles with default thresholds.
pub fn monitor(config: MonitorConfig, store: &Apps, source: &ScriptedSource, effects: &RecordingEffects, clock: &Arc<ManualClock>) -> Monitor {
    Monitor::new(
        config,
        Thresholds::default(),
        Box::new(store.clone()),
        Box::new(source.clone()),
        Box::new(effects.clone()),
    )
    .with_clock(clock.clone())
}
