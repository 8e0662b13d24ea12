//! Typed errors for the monitoring core and its collaborators.
//!
//! Command handlers and the daemon work with `anyhow::Result`; everything the
//! monitor loop touches (store, data source, wake lock) reports a
//! [`WardenError`] so a failing tick can be logged and counted without
//! losing the failure category.

use thiserror::Error;

/// Errors raised by the store, the usage data source and related plumbing.
#[derive(Debug, Error)]
pub enum WardenError {
    /// The SQLite store rejected or failed an operation.
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// The foreground/usage data source could not be queried.
    #[error("usage source unavailable: {0}")]
    Source(String),

    /// Configuration could not be read or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// No record exists for the given application identifier.
    #[error("application '{0}' is not monitored")]
    NotFound(String),

    /// A daily limit outside of `0..=1440` minutes.
    #[error("invalid daily limit: {0} minutes (expected 0-1440)")]
    InvalidLimit(i64),

    /// The suspend-inhibit resource could not be acquired.
    #[error("wake lock unavailable: {0}")]
    WakeLock(String),
}

/// Convenience alias used by the store and source traits.
pub type WardenResult<T> = Result<T, WardenError>;

impl WardenError {
    /// Stable label for structured log fields.
    pub fn label(&self) -> &'static str {
        match self {
            WardenError::Store(_) => "store",
            WardenError::Source(_) => "source",
            WardenError::Config(_) => "config",
            WardenError::NotFound(_) => "not_found",
            WardenError::InvalidLimit(_) => "invalid_limit",
            WardenError::WakeLock(_) => "wake_lock",
        }
    }
}
