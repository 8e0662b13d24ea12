use super::app::MonitoredApp;
use super::formatter::{format_countdown, format_ms, format_usage};
use super::insights::Insights;
use super::messages::Message;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Table of monitored apps with today's usage and state.
    pub fn apps(apps: &[MonitoredApp], now_ms: i64) {
        let mut table = Table::new();

        table.add_row(row!["APP", "NAME", "LIMIT", "TODAY", "SESSION", "WARNINGS", "STATE"]);
        for app in apps {
            let limit = match app.daily_limit_minutes {
                0 => "-".to_string(),
                minutes => format_usage(i64::from(minutes) * 60_000),
            };
            let session = if app.in_session() {
                format_ms(app.session_elapsed_ms(now_ms))
            } else {
                "-".to_string()
            };
            let state = if !app.enabled {
                Message::StateDisabled.to_string()
            } else if app.is_blocked(now_ms) {
                Message::StateBlocked(format_countdown(app.block_remaining_ms(now_ms))).to_string()
            } else if app.over_daily_limit() {
                Message::StateOverLimit.to_string()
            } else {
                Message::StateActive.to_string()
            };
            table.add_row(row![
                app.id,
                app.display_name,
                limit,
                format_usage(app.usage_today_ms),
                session,
                app.warnings_sent,
                state
            ]);
        }
        table.printstd();
    }

    /// Per-day totals followed by the weekly summary.
    pub fn insights(insights: &Insights) {
        let mut table = Table::new();

        table.add_row(row!["DATE", "USAGE"]);
        for day in &insights.days {
            table.add_row(row![day.date.format("%a %d.%m"), format_ms(day.usage_ms)]);
        }
        table.printstd();

        let mut summary = Table::new();
        summary.add_row(row![Message::InsightsTotal.to_string(), format_ms(insights.total_ms)]);
        summary.add_row(row![Message::InsightsAverage.to_string(), format_ms(insights.average_ms)]);
        let most_used = match &insights.most_used {
            Some((app, ms)) => format!("{app} ({})", format_usage(*ms)),
            None => Message::InsightsNoData.to_string(),
        };
        summary.add_row(row![Message::InsightsMostUsed.to_string(), most_used]);
        summary.add_row(row![Message::InsightsStreak.to_string(), Message::StreakDays(insights.streak_days).to_string()]);
        summary.printstd();
    }
}
