//! Archived daily usage totals.

use crate::db::apps::retention_cutoff;
use crate::libs::error::WardenResult;
use chrono::NaiveDate;
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::sync::Arc;

const SELECT_SINCE: &str = "SELECT date, app_id, usage_ms FROM usage_history WHERE date >= ?1 ORDER BY date, app_id";

const INSERT_DAY: &str = "INSERT INTO usage_history (date, app_id, usage_ms) VALUES (?1, ?2, ?3)
     ON CONFLICT(date, app_id) DO UPDATE SET usage_ms = excluded.usage_ms";

/// One finished day of one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageDay {
    pub date: NaiveDate,
    pub app_id: String,
    pub usage_ms: i64,
}

pub struct History {
    pub conn: Arc<Mutex<Connection>>,
}

impl History {
    pub fn from_shared(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Rows inside the retention window ending on `today`.
    pub fn last_week(&self, today: NaiveDate) -> WardenResult<Vec<UsageDay>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_SINCE)?;
        let days = stmt
            .query_map(params![retention_cutoff(today)], |row| {
                Ok(UsageDay {
                    date: row.get(0)?,
                    app_id: row.get(1)?,
                    usage_ms: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(days)
    }

    /// Writes a day directly, replacing an existing row for the same day and app.
    pub fn record(&self, day: &UsageDay) -> WardenResult<()> {
        let conn = self.conn.lock();
        conn.execute(INSERT_DAY, params![day.date, day.app_id, day.usage_ms])?;
        Ok(())
    }
}
