//! Monitored application records.
//!
//! [`Apps`] is the SQLite implementation of [`AppStore`]. Tracking writes
//! (`update_*`, `save_tracking`) touch only the tracking columns, so a limit
//! or name changed from the CLI while the monitor runs is never overwritten
//! by the monitor's copy of the record.

use crate::db::db::Db;
use crate::libs::app::MonitoredApp;
use crate::libs::clock::{local_date, local_day_start_ms};
use crate::libs::error::WardenResult;
use crate::libs::store::AppStore;
use anyhow::Result;
use chrono::{Days, NaiveDate};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;
use tracing::debug;

/// Days kept in `usage_history` and `usage_samples`, today included.
pub const HISTORY_DAYS: u64 = 7;

const SELECT_COLUMNS: &str = "SELECT id, display_name, daily_limit_minutes, enabled, last_reset_ms, usage_today_ms, \
     continuous_start_ms, warnings_sent, blocked_until_ms FROM apps";

const UPSERT_APP: &str = "INSERT INTO apps (id, display_name, daily_limit_minutes, enabled, last_reset_ms, usage_today_ms, \
     continuous_start_ms, warnings_sent, blocked_until_ms) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
     ON CONFLICT(id) DO UPDATE SET display_name = excluded.display_name, daily_limit_minutes = excluded.daily_limit_minutes, \
     enabled = excluded.enabled, last_reset_ms = excluded.last_reset_ms, usage_today_ms = excluded.usage_today_ms, \
     continuous_start_ms = excluded.continuous_start_ms, warnings_sent = excluded.warnings_sent, \
     blocked_until_ms = excluded.blocked_until_ms";

const DELETE_APP: &str = "DELETE FROM apps WHERE id = ?1";

const UPDATE_USAGE: &str = "UPDATE apps SET usage_today_ms = ?1 WHERE id = ?2";

const UPDATE_CONTINUOUS: &str = "UPDATE apps SET continuous_start_ms = ?1, warnings_sent = ?2 WHERE id = ?3";

const UPDATE_BLOCK: &str = "UPDATE apps SET blocked_until_ms = ?1 WHERE id = ?2";

const UPDATE_TRACKING: &str = "UPDATE apps SET usage_today_ms = ?1, continuous_start_ms = ?2, warnings_sent = ?3, \
     blocked_until_ms = ?4 WHERE id = ?5";

const SELECT_STALE: &str = "SELECT id, last_reset_ms, usage_today_ms FROM apps WHERE last_reset_ms < ?1";

const ARCHIVE_DAY: &str = "INSERT INTO usage_history (date, app_id, usage_ms) VALUES (?1, ?2, ?3)
     ON CONFLICT(date, app_id) DO UPDATE SET usage_ms = MAX(usage_ms, excluded.usage_ms)";

const RESET_STALE: &str = "UPDATE apps SET usage_today_ms = 0, continuous_start_ms = 0, warnings_sent = 0, \
     last_reset_ms = ?1 WHERE last_reset_ms < ?1";

const PRUNE_HISTORY: &str = "DELETE FROM usage_history WHERE date < ?1";

const PRUNE_SAMPLES: &str = "DELETE FROM usage_samples WHERE date < ?1";

const SET_ENABLED: &str = "UPDATE apps SET enabled = ?1 WHERE id = ?2";

const SET_LIMIT: &str = "UPDATE apps SET daily_limit_minutes = ?1 WHERE id = ?2";

const UPDATE_SETTINGS: &str = "UPDATE apps SET display_name = COALESCE(?1, display_name), daily_limit_minutes = ?2, \
     enabled = ?3 WHERE id = ?4";

/// SQLite-backed store of monitored applications.
#[derive(Clone)]
pub struct Apps {
    pub conn: Arc<Mutex<Connection>>,
}

impl Apps {
    /// Opens the store in the user data directory.
    pub fn new() -> Result<Self> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Self {
        Self::from_shared(db.shared())
    }

    /// Store over a connection shared with other stores.
    pub fn from_shared(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Toggles monitoring of an app. Returns `false` when the id is unknown.
    pub fn set_enabled(&self, id: &str, enabled: bool) -> WardenResult<bool> {
        let conn = self.conn.lock();
        Ok(conn.execute(SET_ENABLED, params![enabled, id])? > 0)
    }

    /// Changes the daily limit of an app. Returns `false` when the id is unknown.
    pub fn set_limit(&self, id: &str, minutes: u32) -> WardenResult<bool> {
        let conn = self.conn.lock();
        Ok(conn.execute(SET_LIMIT, params![minutes, id])? > 0)
    }

    /// Rewrites the user-owned fields of an app in one statement. A `None`
    /// name keeps the current one. Returns `false` when the id is unknown.
    pub fn update_settings(&self, id: &str, display_name: Option<&str>, minutes: u32, enabled: bool) -> WardenResult<bool> {
        let conn = self.conn.lock();
        Ok(conn.execute(UPDATE_SETTINGS, params![display_name, minutes, enabled, id])? > 0)
    }

    fn query(&self, sql: &str) -> WardenResult<Vec<MonitoredApp>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(sql)?;
        let apps = stmt.query_map([], map_app)?.collect::<Result<Vec<_>, _>>()?;
        Ok(apps)
    }
}

fn map_app(row: &Row) -> rusqlite::Result<MonitoredApp> {
    Ok(MonitoredApp {
        id: row.get(0)?,
        display_name: row.get(1)?,
        daily_limit_minutes: row.get(2)?,
        enabled: row.get(3)?,
        last_reset_ms: row.get(4)?,
        usage_today_ms: row.get(5)?,
        continuous_start_ms: row.get(6)?,
        warnings_sent: row.get(7)?,
        blocked_until_ms: row.get(8)?,
    })
}

/// Oldest date still inside the retention window ending on `today`.
pub fn retention_cutoff(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(HISTORY_DAYS - 1)).unwrap_or(today)
}

impl AppStore for Apps {
    fn get(&self, id: &str) -> WardenResult<Option<MonitoredApp>> {
        let conn = self.conn.lock();
        let app = conn
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id], map_app)
            .optional()?;
        Ok(app)
    }

    fn all_apps(&self) -> WardenResult<Vec<MonitoredApp>> {
        self.query(&format!("{SELECT_COLUMNS} ORDER BY id"))
    }

    fn enabled_apps(&self) -> WardenResult<Vec<MonitoredApp>> {
        self.query(&format!("{SELECT_COLUMNS} WHERE enabled = TRUE ORDER BY id"))
    }

    fn upsert(&self, app: &MonitoredApp) -> WardenResult<()> {
        let conn = self.conn.lock();
        conn.execute(
            UPSERT_APP,
            params![
                app.id,
                app.display_name,
                app.daily_limit_minutes,
                app.enabled,
                app.last_reset_ms,
                app.usage_today_ms,
                app.continuous_start_ms,
                app.warnings_sent,
                app.blocked_until_ms,
            ],
        )?;
        Ok(())
    }

    fn delete(&self, id: &str) -> WardenResult<bool> {
        let conn = self.conn.lock();
        Ok(conn.execute(DELETE_APP, params![id])? > 0)
    }

    fn update_usage(&self, id: &str, usage_today_ms: i64) -> WardenResult<()> {
        let conn = self.conn.lock();
        conn.execute(UPDATE_USAGE, params![usage_today_ms, id])?;
        Ok(())
    }

    fn update_continuous_state(&self, id: &str, continuous_start_ms: i64, warnings_sent: u32) -> WardenResult<()> {
        let warnings_sent = if continuous_start_ms == 0 { 0 } else { warnings_sent };
        let conn = self.conn.lock();
        conn.execute(UPDATE_CONTINUOUS, params![continuous_start_ms, warnings_sent, id])?;
        Ok(())
    }

    fn update_block_window(&self, id: &str, blocked_until_ms: i64) -> WardenResult<()> {
        let conn = self.conn.lock();
        conn.execute(UPDATE_BLOCK, params![blocked_until_ms, id])?;
        Ok(())
    }

    fn save_tracking(&self, app: &MonitoredApp) -> WardenResult<()> {
        let warnings_sent = if app.continuous_start_ms == 0 { 0 } else { app.warnings_sent };
        let conn = self.conn.lock();
        conn.execute(
            UPDATE_TRACKING,
            params![app.usage_today_ms, app.continuous_start_ms, warnings_sent, app.blocked_until_ms, app.id],
        )?;
        Ok(())
    }

    fn reset_stale_usage(&self, day_start_ms: i64) -> WardenResult<usize> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let stale: Vec<(String, i64, i64)> = {
            let mut stmt = tx.prepare(SELECT_STALE)?;
            let rows = stmt
                .query_map(params![day_start_ms], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        for (app_id, last_reset_ms, usage_ms) in &stale {
            if *usage_ms > 0 {
                // A record never reset before carries last_reset_ms = 0.
                let day = local_date(local_day_start_ms(*last_reset_ms));
                tx.execute(ARCHIVE_DAY, params![day, app_id, usage_ms])?;
            }
        }

        let reset = tx.execute(RESET_STALE, params![day_start_ms])?;

        let cutoff = retention_cutoff(local_date(day_start_ms));
        let pruned = tx.execute(PRUNE_HISTORY, params![cutoff])? + tx.execute(PRUNE_SAMPLES, params![cutoff])?;

        tx.commit()?;

        if reset > 0 {
            debug!(reset, pruned, day_start_ms, "reset stale usage counters");
        }
        Ok(reset)
    }
}
