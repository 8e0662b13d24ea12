#[cfg(test)]
mod tests {
    use appwarden::libs::daemon::{status_at, stop_at, WatchStatus, PID_FILE};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// A PID file location nobody else writes to.
    struct PidFileContext {
        _temp_dir: TempDir,
        pid_path: PathBuf,
    }

    impl TestContext for PidFileContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let pid_path = temp_dir.path().join(PID_FILE);
            PidFileContext {
                _temp_dir: temp_dir,
                pid_path,
            }
        }
    }

    // Above the kernel's pid_max, so never a live process.
    const DEAD_PID: u32 = i32::MAX as u32;

    #[test_context(PidFileContext)]
    #[test]
    fn test_no_pid_file_means_not_running(ctx: &mut PidFileContext) {
        assert_eq!(status_at(&ctx.pid_path).unwrap(), WatchStatus::NotRunning);
        assert_eq!(stop_at(&ctx.pid_path).unwrap(), None);
    }

    #[test_context(PidFileContext)]
    #[test]
    fn test_live_process_is_running(ctx: &mut PidFileContext) {
        let pid = std::process::id();
        std::fs::write(&ctx.pid_path, pid.to_string()).unwrap();

        assert_eq!(status_at(&ctx.pid_path).unwrap(), WatchStatus::Running(pid));
    }

    #[test_context(PidFileContext)]
    #[test]
    fn test_dead_process_is_stale(ctx: &mut PidFileContext) {
        std::fs::write(&ctx.pid_path, format!("{DEAD_PID}\n")).unwrap();

        assert_eq!(status_at(&ctx.pid_path).unwrap(), WatchStatus::Stale(DEAD_PID));
    }

    #[test_context(PidFileContext)]
    #[test]
    fn test_stopping_a_dead_process_cleans_up(ctx: &mut PidFileContext) {
        std::fs::write(&ctx.pid_path, DEAD_PID.to_string()).unwrap();

        assert_eq!(stop_at(&ctx.pid_path).unwrap(), None);
        assert!(!ctx.pid_path.exists());
    }

    #[test_context(PidFileContext)]
    #[test]
    fn test_garbage_pid_file_is_rejected(ctx: &mut PidFileContext) {
        for content in ["", "watcher", "0", "-12", "4294967295"] {
            std::fs::write(&ctx.pid_path, content).unwrap();
            assert!(status_at(&ctx.pid_path).is_err(), "accepted {content:?}");
        }
    }
}
