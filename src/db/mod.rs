//! SQLite persistence for appwarden.
//!
//! One database file in the user data directory holds three tables:
//!
//! - `apps`: one row per monitored application with its policy and live
//!   tracking state
//! - `usage_history`: finished days, written on day rollover and kept for
//!   a 7-day window
//! - `usage_samples`: per-day foreground time ledger fed by the desktop data
//!   source
//!
//! ## Usage
//!
//! ```rust,no_run
//! use appwarden::db::apps::Apps;
//! use appwarden::libs::store::AppStore;
//!
//! let apps = Apps::new()?;
//! for app in apps.enabled_apps()? {
//!     println!("{} ({} min/day)", app.id, app.daily_limit_minutes);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Stores opened from the same [`db::Db`] share one connection behind an
//! `Arc<parking_lot::Mutex<_>>`, so the monitor and the data source write
//! through a single handle.

/// Connection management and initialization.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Monitored application records.
pub mod apps;

/// Archived daily totals.
pub mod history;

/// Per-day foreground usage ledger.
pub mod samples;
