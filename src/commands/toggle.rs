//! Enable or disable monitoring of an application without deleting it.

use crate::{
    db::apps::Apps,
    libs::{error::WardenError, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ToggleArgs {
    /// Application id
    id: String,
}

pub fn cmd(args: ToggleArgs, enabled: bool) -> Result<()> {
    let apps = Apps::new()?;
    set_enabled(&apps, &args.id, enabled)?;
    if enabled {
        msg_success!(Message::AppEnabled(args.id));
    } else {
        msg_success!(Message::AppDisabled(args.id));
    }
    Ok(())
}

pub fn set_enabled(apps: &Apps, id: &str, enabled: bool) -> Result<()> {
    if !apps.set_enabled(id, enabled)? {
        return Err(WardenError::NotFound(id.to_string()).into());
    }
    Ok(())
}
