//! Core of the usage monitor: the app model, the warning/blocking policy,
//! the monitor loop and the collaborators it is wired to.

pub mod app;
pub mod cache;
pub mod clock;
pub mod config;
pub mod daemon;
pub mod data_storage;
pub mod effects;
pub mod error;
pub mod formatter;
pub mod insights;
pub mod messages;
pub mod monitor;
pub mod policy;
pub mod source;
pub mod store;
pub mod view;
pub mod wake_lock;
