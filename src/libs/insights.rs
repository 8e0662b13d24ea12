//! Weekly usage summary.
//!
//! Combines the archived days from `usage_history` with the live counters of
//! the current day into a 7-day window ending today.

use crate::db::history::UsageDay;
use crate::libs::app::{AppId, MonitoredApp};
use crate::libs::clock::local_date;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

/// Days in the window, today included.
pub const WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub usage_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insights {
    /// One entry per day, oldest first, ending today.
    pub days: Vec<DayTotal>,
    pub total_ms: i64,
    /// Total spread over the whole window, empty days included.
    pub average_ms: i64,
    /// App with the most usage in the window and its total.
    pub most_used: Option<(AppId, i64)>,
    /// Consecutive days, counting back from today, under the daily goal.
    pub streak_days: u32,
}

impl Insights {
    pub fn compute(history: &[UsageDay], apps: &[MonitoredApp], today: NaiveDate, daily_goal_ms: i64) -> Self {
        let first = today.checked_sub_days(Days::new(WINDOW_DAYS - 1)).unwrap_or(today);
        let in_window = |date: NaiveDate| date >= first && date <= today;

        // (date, app) -> ms; live counters win over an archived row of the same day.
        let mut usage: BTreeMap<(NaiveDate, AppId), i64> = BTreeMap::new();
        for day in history.iter().filter(|d| in_window(d.date)) {
            let entry = usage.entry((day.date, day.app_id.clone())).or_default();
            *entry = (*entry).max(day.usage_ms);
        }
        for app in apps.iter().filter(|a| a.usage_today_ms > 0) {
            let date = local_date(app.last_reset_ms);
            if in_window(date) {
                let entry = usage.entry((date, app.id.clone())).or_default();
                *entry = (*entry).max(app.usage_today_ms);
            }
        }

        let days: Vec<DayTotal> = first
            .iter_days()
            .take_while(|date| *date <= today)
            .map(|date| DayTotal {
                date,
                usage_ms: usage.iter().filter(|((d, _), _)| *d == date).map(|(_, ms)| ms).sum(),
            })
            .collect();

        let total_ms: i64 = days.iter().map(|d| d.usage_ms).sum();

        let mut per_app: BTreeMap<&str, i64> = BTreeMap::new();
        for ((_, app), ms) in &usage {
            *per_app.entry(app.as_str()).or_default() += ms;
        }
        // Ties go to the alphabetically first id.
        let most_used = per_app
            .into_iter()
            .filter(|(_, ms)| *ms > 0)
            .fold(None::<(&str, i64)>, |best, (app, ms)| match best {
                Some((_, best_ms)) if best_ms >= ms => best,
                _ => Some((app, ms)),
            })
            .map(|(app, ms)| (app.to_string(), ms));

        let streak_days = days.iter().rev().take_while(|d| d.usage_ms < daily_goal_ms).count() as u32;

        Self {
            days,
            total_ms,
            average_ms: total_ms / WINDOW_DAYS as i64,
            most_used,
            streak_days,
        }
    }
}
