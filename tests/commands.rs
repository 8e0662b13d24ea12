mod support;

#[cfg(test)]
mod tests {
    use crate::support::{memory_store, MINUTE_MS};
    use appwarden::commands::add::add_app;
    use appwarden::commands::limit::set_limit;
    use appwarden::commands::toggle::set_enabled;
    use appwarden::db::apps::Apps;
    use appwarden::libs::error::WardenError;
    use appwarden::libs::store::AppStore;
    use test_context::{test_context, TestContext};

    const NOW: i64 = 1_780_000_000_000;

    struct CommandContext {
        apps: Apps,
    }

    impl TestContext for CommandContext {
        fn setup() -> Self {
            CommandContext { apps: memory_store() }
        }
    }

    fn warden_error(err: &anyhow::Error) -> Option<&WardenError> {
        err.downcast_ref::<WardenError>()
    }

    #[test_context(CommandContext)]
    #[test]
    fn test_add_creates_an_enabled_app(ctx: &mut CommandContext) {
        let (app, created) = add_app(&ctx.apps, "firefox", None, 90, NOW).unwrap();

        assert!(created);
        assert_eq!(app.display_name, "firefox");
        assert_eq!(ctx.apps.get("firefox").unwrap(), Some(app));
    }

    #[test_context(CommandContext)]
    #[test]
    fn test_adding_again_keeps_todays_usage(ctx: &mut CommandContext) {
        add_app(&ctx.apps, "firefox", Some("Firefox".to_string()), 60, NOW).unwrap();
        ctx.apps.update_usage("firefox", 25 * MINUTE_MS).unwrap();
        ctx.apps.set_enabled("firefox", false).unwrap();

        let (app, created) = add_app(&ctx.apps, "firefox", None, 30, NOW + MINUTE_MS).unwrap();

        assert!(!created);
        assert!(app.enabled);
        assert_eq!(app.display_name, "Firefox");
        assert_eq!(app.daily_limit_minutes, 30);
        assert_eq!(app.usage_today_ms, 25 * MINUTE_MS);
        assert_eq!(app.last_reset_ms, NOW);
    }

    #[test_context(CommandContext)]
    #[test]
    fn test_adding_again_keeps_the_monitors_tracking_state(ctx: &mut CommandContext) {
        add_app(&ctx.apps, "firefox", None, 60, NOW).unwrap();
        ctx.apps.update_continuous_state("firefox", NOW, 2).unwrap();
        ctx.apps.update_block_window("firefox", NOW + 60 * MINUTE_MS).unwrap();

        let (app, _) = add_app(&ctx.apps, "firefox", Some("Firefox".to_string()), 45, NOW + MINUTE_MS).unwrap();

        assert_eq!((app.continuous_start_ms, app.warnings_sent), (NOW, 2));
        assert_eq!(app.blocked_until_ms, NOW + 60 * MINUTE_MS);
        assert_eq!(app.display_name, "Firefox");
        assert_eq!(ctx.apps.get("firefox").unwrap(), Some(app));
    }

    #[test_context(CommandContext)]
    #[test]
    fn test_add_rejects_limits_over_a_day(ctx: &mut CommandContext) {
        let err = add_app(&ctx.apps, "firefox", None, 1441, NOW).unwrap_err();

        assert!(matches!(warden_error(&err), Some(WardenError::InvalidLimit(1441))));
        assert!(ctx.apps.get("firefox").unwrap().is_none());
    }

    #[test_context(CommandContext)]
    #[test]
    fn test_limit_updates_only_the_limit(ctx: &mut CommandContext) {
        add_app(&ctx.apps, "telegram", None, 60, NOW).unwrap();
        ctx.apps.update_continuous_state("telegram", NOW, 1).unwrap();

        set_limit(&ctx.apps, "telegram", 0).unwrap();

        let app = ctx.apps.get("telegram").unwrap().unwrap();
        assert_eq!(app.daily_limit_minutes, 0);
        assert_eq!((app.continuous_start_ms, app.warnings_sent), (NOW, 1));
    }

    #[test_context(CommandContext)]
    #[test]
    fn test_limit_errors(ctx: &mut CommandContext) {
        add_app(&ctx.apps, "telegram", None, 60, NOW).unwrap();

        let too_long = set_limit(&ctx.apps, "telegram", 2000).unwrap_err();
        assert!(matches!(warden_error(&too_long), Some(WardenError::InvalidLimit(2000))));

        let missing = set_limit(&ctx.apps, "slack", 10).unwrap_err();
        assert!(matches!(warden_error(&missing), Some(WardenError::NotFound(id)) if id == "slack"));
    }

    #[test_context(CommandContext)]
    #[test]
    fn test_enable_and_disable(ctx: &mut CommandContext) {
        add_app(&ctx.apps, "steam", None, 120, NOW).unwrap();

        set_enabled(&ctx.apps, "steam", false).unwrap();
        assert!(ctx.apps.enabled_apps().unwrap().is_empty());

        set_enabled(&ctx.apps, "steam", true).unwrap();
        assert_eq!(ctx.apps.enabled_apps().unwrap().len(), 1);

        assert!(set_enabled(&ctx.apps, "missing", true).is_err());
    }
}
