//! # appwarden - personal app usage limits
//!
//! A background monitor that watches the foreground application, warns after
//! long continuous sessions and blocks applications once their daily limit
//! or the continuous-use budget is spent.
//!
//! ## Layout
//!
//! - [`libs::monitor`]: the polling loop and its failure handling
//! - [`libs::policy`]: warning and blocking decisions for one app
//! - [`db`]: SQLite-backed app records, daily history and usage samples
//! - [`platform`]: foreground window probes per operating system
//! - [`commands`]: the `appwarden` command line
//!
//! ## Usage
//!
//! ```rust,no_run
//! use appwarden::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod platform;
