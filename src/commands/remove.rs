//! Opt an application out of monitoring.

use crate::{
    db::apps::Apps,
    libs::{messages::Message, store::AppStore},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Application id
    id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(args: RemoveArgs) -> Result<()> {
    let apps = Apps::new()?;

    if apps.get(&args.id)?.is_none() {
        msg_info!(Message::AppNotMonitored(args.id));
        return Ok(());
    }

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmRemoveApp(args.id.clone()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    if apps.delete(&args.id)? {
        msg_success!(Message::AppRemoved(args.id));
    }
    Ok(())
}
