//! Change the daily limit of a monitored application.

use crate::{
    db::apps::Apps,
    libs::{app::validate_limit, error::WardenError, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct LimitArgs {
    /// Application id
    id: String,
    /// New daily limit in minutes, 0 removes the daily cap
    minutes: u32,
}

pub fn cmd(args: LimitArgs) -> Result<()> {
    let apps = Apps::new()?;
    set_limit(&apps, &args.id, args.minutes)?;
    msg_success!(Message::AppLimitChanged(args.id, args.minutes));
    Ok(())
}

/// Changes the limit without touching the tracking state of the app.
pub fn set_limit(apps: &Apps, id: &str, minutes: u32) -> Result<()> {
    if !apps.set_limit(id, validate_limit(minutes)?)? {
        return Err(WardenError::NotFound(id.to_string()).into());
    }
    Ok(())
}
