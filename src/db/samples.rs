//! Per-day foreground time ledger.

use crate::libs::error::WardenResult;
use chrono::NaiveDate;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;

const ADD_SAMPLE: &str = "INSERT INTO usage_samples (date, app_id, usage_ms) VALUES (?1, ?2, ?3)
     ON CONFLICT(date, app_id) DO UPDATE SET usage_ms = usage_ms + excluded.usage_ms";

const SELECT_USAGE: &str = "SELECT usage_ms FROM usage_samples WHERE date = ?1 AND app_id = ?2";

#[derive(Clone)]
pub struct Samples {
    pub conn: Arc<Mutex<Connection>>,
}

impl Samples {
    pub fn from_shared(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Adds `ms` of foreground time to `app_id` on `date`.
    pub fn add(&self, date: NaiveDate, app_id: &str, ms: i64) -> WardenResult<()> {
        let conn = self.conn.lock();
        conn.execute(ADD_SAMPLE, params![date, app_id, ms])?;
        Ok(())
    }

    /// Total foreground time of `app_id` on `date`, `0` when never seen.
    pub fn usage_on(&self, date: NaiveDate, app_id: &str) -> WardenResult<i64> {
        let conn = self.conn.lock();
        let usage = conn
            .query_row(SELECT_USAGE, params![date, app_id], |row| row.get::<_, i64>(0))
            .optional()?;
        Ok(usage.unwrap_or(0))
    }
}
