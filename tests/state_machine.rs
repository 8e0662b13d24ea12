#[cfg(test)]
mod tests {
    use appwarden::libs::app::{MonitoredApp, SessionState, MINUTE_MS};
    use appwarden::libs::policy::{evaluate, Action, BlockReason, Thresholds};

    const HOUR_MS: i64 = 60 * MINUTE_MS;
    const T0: i64 = 1_700_000_000_000;

    fn app(limit_minutes: u32) -> MonitoredApp {
        MonitoredApp::new("feed", "Feed", limit_minutes, T0)
    }

    #[test]
    fn test_idle_app_starts_tracking() {
        let mut app = app(0);
        let actions = evaluate(&mut app, T0, &Thresholds::default());

        assert!(actions.is_empty());
        assert_eq!(app.state(T0), SessionState::Tracking { started_ms: T0, warnings: 0 });
    }

    #[test]
    fn test_each_threshold_warns_once() {
        let t = Thresholds::default();
        let mut app = app(0);
        evaluate(&mut app, T0, &t);

        assert!(evaluate(&mut app, T0 + HOUR_MS - 1, &t).is_empty());
        assert_eq!(evaluate(&mut app, T0 + HOUR_MS, &t), vec![Action::Warn { ordinal: 1, total: 3 }]);
        assert!(evaluate(&mut app, T0 + HOUR_MS + 10_000, &t).is_empty());
        assert_eq!(evaluate(&mut app, T0 + 2 * HOUR_MS, &t), vec![Action::Warn { ordinal: 2, total: 3 }]);
        assert_eq!(evaluate(&mut app, T0 + 3 * HOUR_MS, &t), vec![Action::Warn { ordinal: 3, total: 3 }]);
        assert_eq!(app.warnings_sent, 3);
    }

    #[test]
    fn test_block_follows_the_last_warning() {
        let t = Thresholds::default();
        let mut app = app(0);
        evaluate(&mut app, T0, &t);
        for hour in 1..=3 {
            evaluate(&mut app, T0 + hour * HOUR_MS, &t);
        }

        let now = T0 + 3 * HOUR_MS + 10_000;
        let actions = evaluate(&mut app, now, &t);

        assert_eq!(
            actions,
            vec![
                Action::LimitReached {
                    reason: BlockReason::ContinuousUse
                },
                Action::ShowBlockScreen { until_ms: now + HOUR_MS },
            ]
        );
        assert_eq!(app.state(now), SessionState::Blocked { until_ms: now + HOUR_MS });
        assert_eq!(app.continuous_start_ms, 0);
        assert_eq!(app.warnings_sent, 0);
    }

    #[test]
    fn test_late_tick_never_skips_warnings() {
        let t = Thresholds::default();
        let mut app = app(0);
        evaluate(&mut app, T0, &t);

        let late = T0 + 6 * HOUR_MS;
        assert_eq!(evaluate(&mut app, late, &t), vec![Action::Warn { ordinal: 1, total: 3 }]);
        assert_eq!(evaluate(&mut app, late + 1, &t), vec![Action::Warn { ordinal: 2, total: 3 }]);
        assert_eq!(evaluate(&mut app, late + 2, &t), vec![Action::Warn { ordinal: 3, total: 3 }]);
        assert!(matches!(
            evaluate(&mut app, late + 3, &t).first(),
            Some(Action::LimitReached {
                reason: BlockReason::ContinuousUse
            })
        ));
    }

    #[test]
    fn test_daily_limit_wins_over_tracking() {
        let t = Thresholds::default();
        let mut app = app(60);
        evaluate(&mut app, T0, &t);
        evaluate(&mut app, T0 + HOUR_MS, &t);
        assert_eq!(app.warnings_sent, 1);

        app.refresh_usage(60 * MINUTE_MS);
        let now = T0 + HOUR_MS + 10_000;
        let actions = evaluate(&mut app, now, &t);

        assert_eq!(
            actions[0],
            Action::LimitReached {
                reason: BlockReason::DailyLimit
            }
        );
        assert_eq!(app.blocked_until_ms, now + HOUR_MS);
        assert!(!app.in_session());
        assert_eq!(app.warnings_sent, 0);
    }

    #[test]
    fn test_usage_below_limit_does_not_block() {
        let mut app = app(60);
        app.refresh_usage(60 * MINUTE_MS - 1);
        evaluate(&mut app, T0, &Thresholds::default());
        assert_eq!(app.blocked_until_ms, 0);
    }

    #[test]
    fn test_expired_block_returns_to_idle() {
        let mut app = app(0);
        app.block_until(T0 + HOUR_MS);

        assert!(app.is_blocked(T0 + HOUR_MS - 1));
        assert_eq!(app.state(T0 + HOUR_MS), SessionState::Idle);
        assert_eq!(app.block_remaining_ms(T0 + HOUR_MS + 5), 0);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = Thresholds {
            warning_interval_ms: 10 * MINUTE_MS,
            total_warnings: 1,
            block_duration_ms: 5 * MINUTE_MS,
        };
        let mut app = app(0);
        evaluate(&mut app, T0, &t);

        assert_eq!(evaluate(&mut app, T0 + 10 * MINUTE_MS, &t), vec![Action::Warn { ordinal: 1, total: 1 }]);
        let now = T0 + 11 * MINUTE_MS;
        assert_eq!(evaluate(&mut app, now, &t)[1], Action::ShowBlockScreen { until_ms: now + 5 * MINUTE_MS });
    }
}
