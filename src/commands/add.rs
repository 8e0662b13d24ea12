//! Opt an application into monitoring.

use crate::{
    db::apps::Apps,
    libs::{
        app::{validate_limit, MonitoredApp},
        clock::{Clock, SystemClock},
        config::Config,
        messages::Message,
        store::{require, AppStore},
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Application id (process name, e.g. `firefox`)
    id: String,
    /// Display name, defaults to the id
    #[arg(short, long)]
    name: Option<String>,
    /// Daily limit in minutes, 0 for no daily cap
    #[arg(short, long)]
    limit: Option<u32>,
}

pub fn cmd(args: AddArgs) -> Result<()> {
    let config = Config::read()?;
    let apps = Apps::new()?;
    let limit = args.limit.unwrap_or(config.limits_or_default().default_limit_minutes);

    let (app, created) = add_app(&apps, &args.id, args.name, limit, SystemClock.now_ms())?;
    if created {
        msg_success!(Message::AppAdded(app.id, app.daily_limit_minutes));
    } else {
        msg_info!(Message::AppUpdated(app.id));
    }
    Ok(())
}

/// Adds `id` or, when it is already monitored, updates its name and limit
/// and re-enables it.
///
/// An existing record only gets its user-owned columns rewritten, so the
/// tracking state a running monitor writes meanwhile is kept. Returns the
/// stored record and whether it was newly created.
pub fn add_app(apps: &Apps, id: &str, name: Option<String>, limit: u32, now_ms: i64) -> Result<(MonitoredApp, bool)> {
    let limit = validate_limit(limit)?;

    if apps.update_settings(id, name.as_deref(), limit, true)? {
        return Ok((require(apps, id)?, false));
    }

    let display_name = name.unwrap_or_else(|| id.to_string());
    let app = MonitoredApp::new(id, display_name, limit, now_ms);
    apps.upsert(&app)?;
    Ok((app, true))
}
