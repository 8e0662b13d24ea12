//! Seven-day usage summary.

use crate::{
    db::{apps::Apps, history::History},
    libs::{
        app::MINUTE_MS,
        clock::{local_date, Clock, SystemClock},
        config::Config,
        insights::Insights,
        messages::Message,
        store::AppStore,
        view::View,
    },
    msg_print,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let config = Config::read()?;
    let apps = Apps::new()?;
    let history = History::from_shared(apps.conn.clone());

    let today = local_date(SystemClock.now_ms());
    let goal_ms = i64::from(config.limits_or_default().daily_goal_minutes) * MINUTE_MS;
    let insights = Insights::compute(&history.last_week(today)?, &apps.all_apps()?, today, goal_ms);

    msg_print!(Message::InsightsHeader, true);
    View::insights(&insights);
    Ok(())
}
