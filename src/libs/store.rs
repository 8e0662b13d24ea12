//! Persistence boundary for monitored applications.
//!
//! The SQLite implementation lives in [`crate::db::apps::Apps`]; tests use
//! the same implementation over an in-memory database.

use crate::libs::app::{AppId, MonitoredApp};
use crate::libs::error::WardenResult;

/// Durable record store keyed by application id.
///
/// Every write is idempotent: repeating it with the same arguments leaves the
/// store in the same state.
pub trait AppStore: Send {
    /// Point lookup.
    fn get(&self, id: &str) -> WardenResult<Option<MonitoredApp>>;

    /// Every record, enabled or not, ordered by id.
    fn all_apps(&self) -> WardenResult<Vec<MonitoredApp>>;

    /// Snapshot of records with `enabled = true`.
    fn enabled_apps(&self) -> WardenResult<Vec<MonitoredApp>>;

    /// Inserts or fully replaces the record with the same id.
    fn upsert(&self, app: &MonitoredApp) -> WardenResult<()>;

    /// Removes a record. Returns `false` when nothing was removed.
    fn delete(&self, id: &str) -> WardenResult<bool>;

    /// Stores a fresh usage reading.
    fn update_usage(&self, id: &str, usage_today_ms: i64) -> WardenResult<()>;

    /// Stores the continuous session. A zero start always clears the warning
    /// counter with it.
    fn update_continuous_state(&self, id: &str, continuous_start_ms: i64, warnings_sent: u32) -> WardenResult<()>;

    /// Stores the block window.
    fn update_block_window(&self, id: &str, blocked_until_ms: i64) -> WardenResult<()>;

    /// Writes the tracking fields of `app` in one statement, leaving the
    /// user-owned fields (name, limit, enabled) untouched.
    fn save_tracking(&self, app: &MonitoredApp) -> WardenResult<()>;

    /// Day rollover: every record whose `last_reset_ms` predates
    /// `day_start_ms` gets its finished day archived and its counters
    /// cleared. Returns how many records were reset.
    fn reset_stale_usage(&self, day_start_ms: i64) -> WardenResult<usize>;
}

/// Convenience lookup that turns a missing record into an error.
pub fn require(store: &dyn AppStore, id: &str) -> WardenResult<MonitoredApp> {
    store
        .get(id)?
        .ok_or_else(|| crate::libs::error::WardenError::NotFound(AppId::from(id)))
}
