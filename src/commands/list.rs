//! Show monitored applications.

use crate::{
    db::apps::Apps,
    libs::{
        clock::{Clock, SystemClock},
        messages::Message,
        store::AppStore,
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let apps = Apps::new()?.all_apps()?;
    if apps.is_empty() {
        msg_info!(Message::NoAppsMonitored);
        return Ok(());
    }

    msg_print!(Message::AppsHeader, true);
    View::apps(&apps, SystemClock.now_ms());
    Ok(())
}
