//! Database schema migrations.
//!
//! Every schema change is a numbered migration applied in order inside one
//! transaction when a [`Db`](crate::db::db::Db) is opened. Applied versions
//! are recorded in the `migrations` table so each runs exactly once.
//!
//! ## Usage
//!
//! ```rust
//! use appwarden::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! init_with_migrations(&mut conn)?;
//! assert_eq!(get_db_version(&conn)?, 3);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// Tracking table for applied migrations.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema change.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of every migration, in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: monitored applications with their live tracking state
        self.add_migration(1, "create_apps", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS apps (
                    id TEXT NOT NULL PRIMARY KEY,
                    display_name TEXT NOT NULL,
                    daily_limit_minutes INTEGER NOT NULL DEFAULT 60,
                    enabled BOOLEAN NOT NULL DEFAULT TRUE,
                    last_reset_ms INTEGER NOT NULL DEFAULT 0,
                    usage_today_ms INTEGER NOT NULL DEFAULT 0,
                    continuous_start_ms INTEGER NOT NULL DEFAULT 0,
                    warnings_sent INTEGER NOT NULL DEFAULT 0,
                    blocked_until_ms INTEGER NOT NULL DEFAULT 0
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_apps_enabled ON apps(enabled)", [])?;
            Ok(())
        });

        // Version 2: finished days for the weekly insights
        self.add_migration(2, "add_usage_history", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS usage_history (
                    id INTEGER PRIMARY KEY,
                    date DATE NOT NULL,
                    app_id TEXT NOT NULL,
                    usage_ms INTEGER NOT NULL,
                    UNIQUE (date, app_id)
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_usage_history_date ON usage_history(date)", [])?;
            Ok(())
        });

        // Version 3: foreground time ledger written by the desktop source
        self.add_migration(3, "add_usage_samples", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS usage_samples (
                    date DATE NOT NULL,
                    app_id TEXT NOT NULL,
                    usage_ms INTEGER NOT NULL DEFAULT 0,
                    PRIMARY KEY (date, app_id)
                )",
                [],
            )?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every pending migration in a single transaction.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    /// Highest applied version, `0` for a fresh database.
    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn
            .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))
            .unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;

        Ok(count > 0)
    }

    /// `(version, name, applied_at)` for every applied migration.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }

    fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }
}

/// Brings `conn` up to the latest schema.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    Ok(current < manager.latest_version())
}

/// Logs the schema state; used by `appwarden init`.
pub fn report_version(conn: &Connection) -> Result<()> {
    let version = get_db_version(conn)?;
    msg_info!(Message::DatabaseVersion(version));
    Ok(())
}
