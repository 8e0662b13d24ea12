#[cfg(test)]
mod tests {
    use appwarden::libs::config::{Config, LimitsConfig, MonitorConfig, CONFIG_FILE_NAME};
    use appwarden::libs::data_storage::{DataStorage, APP_NAME, VENDOR_NAME};
    use appwarden::libs::policy::Thresholds;
    use std::path::Path;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.monitor.is_none());
        assert!(config.limits.is_none());

        let monitor = config.monitor_or_default();
        assert_eq!(monitor.poll_interval, 10_000);
        assert_eq!(monitor.foreground_cache_ttl, 4_000);
        assert_eq!(monitor.apps_cache_ttl, 30_000);
        assert_eq!(monitor.max_failures, 5);
        assert!(!monitor.terminate_blocked);

        let limits = config.limits_or_default();
        assert_eq!(limits.default_limit_minutes, 60);
        assert_eq!(limits.daily_goal_minutes, 240);
        assert_eq!(Thresholds::from(&limits), Thresholds::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_reads_as_default(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join("absent.json");
        assert_eq!(Config::read_from(&path).unwrap(), Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_round_trip(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        let config = Config {
            monitor: Some(MonitorConfig {
                poll_interval: 2_000,
                terminate_blocked: true,
                ..Default::default()
            }),
            limits: Some(LimitsConfig {
                warning_interval_minutes: 30,
                total_warnings: 2,
                ..Default::default()
            }),
        };

        config.save_to(&path).unwrap();

        assert_eq!(Config::read_from(&path).unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_sections_fill_defaults(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{ "monitor": { "poll_interval": 500 } }"#).unwrap();

        let config = Config::read_from(&path).unwrap();

        let monitor = config.monitor.clone().unwrap();
        assert_eq!(monitor.poll_interval, 500);
        assert_eq!(monitor.max_failures, MonitorConfig::default().max_failures);
        assert!(config.limits.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::read_from(&path).is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_config_lives_in_the_data_directory(ctx: &mut ConfigTestContext) {
        // Mock the home/appdata directory for cross-platform compatibility.
        std::env::set_var("HOME", ctx.temp_dir.path());
        std::env::set_var("LOCALAPPDATA", ctx.temp_dir.path());

        let config = Config {
            monitor: None,
            limits: Some(LimitsConfig {
                block_minutes: 15,
                ..Default::default()
            }),
        };
        config.save().unwrap();

        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        assert!(path.exists());
        assert!(path.starts_with(ctx.temp_dir.path()));
        assert!(path.ends_with(Path::new(VENDOR_NAME).join(APP_NAME).join(CONFIG_FILE_NAME)));
        assert_eq!(Config::read_from(&path).unwrap().limits_or_default().block_minutes, 15);
    }

    #[test]
    fn test_thresholds_never_zero() {
        let limits = LimitsConfig {
            warning_interval_minutes: 0,
            total_warnings: 0,
            block_minutes: 0,
            ..Default::default()
        };
        let t = Thresholds::from(&limits);
        assert!(t.warning_interval_ms > 0);
        assert_eq!(t.total_warnings, 1);
        assert!(t.block_duration_ms > 0);
    }

    #[test]
    fn test_sample_gap_covers_the_longest_tick_delay() {
        // 10 s doubled four times before the fifth failure stops the loop.
        assert_eq!(MonitorConfig::default().sample_gap_ms(), 2 * 160_000);

        let slow = MonitorConfig {
            poll_interval: 120_000,
            max_failures: 1,
            ..Default::default()
        };
        assert_eq!(slow.sample_gap_ms(), 240_000);

        let generous = MonitorConfig {
            max_sample_gap: 3_600_000,
            ..Default::default()
        };
        assert_eq!(generous.sample_gap_ms(), 3_600_000);
    }
}
