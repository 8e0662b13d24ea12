//! Text of every [`Message`].

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            // === APP MESSAGES ===
            Message::AppAdded(id, 0) => format!("Monitoring '{}' without a daily limit", id),
            Message::AppAdded(id, limit) => format!("Monitoring '{}' with a daily limit of {} min", id, limit),
            Message::AppUpdated(id) => format!("'{}' is already monitored, settings updated", id),
            Message::AppRemoved(id) => format!("'{}' is no longer monitored", id),
            Message::AppEnabled(id) => format!("Monitoring of '{}' enabled", id),
            Message::AppDisabled(id) => format!("Monitoring of '{}' disabled", id),
            Message::AppLimitChanged(id, 0) => format!("Daily limit of '{}' removed", id),
            Message::AppLimitChanged(id, limit) => format!("Daily limit of '{}' set to {} min", id, limit),
            Message::AppNotMonitored(id) => format!("'{}' is not monitored", id),
            Message::AppsHeader => "Monitored applications:".to_string(),
            Message::NoAppsMonitored => "No applications are monitored yet. Add one with `appwarden add <id>`".to_string(),
            Message::ConfirmRemoveApp(id) => format!("Stop monitoring '{}' and forget today's usage?", id),
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === TABLE STATES ===
            Message::StateActive => "active".to_string(),
            Message::StateDisabled => "disabled".to_string(),
            Message::StateOverLimit => "over limit".to_string(),
            Message::StateBlocked(remaining) => format!("blocked ({})", remaining),

            // === USAGE NOTIFICATIONS ===
            Message::ContinuousUsageWarning { app, ordinal, total } => {
                format!("You have been using {} continuously for {} hour(s). Warning {} of {}", app, ordinal, ordinal, total)
            }
            Message::UsageLimitReached(app) => format!("{} usage limit reached", app),
            Message::AppBlocked { app, remaining } => format!("{} is blocked for {}", app, remaining),

            // === INSIGHTS MESSAGES ===
            Message::InsightsHeader => "Usage over the last 7 days:".to_string(),
            Message::InsightsTotal => "Total".to_string(),
            Message::InsightsAverage => "Daily average".to_string(),
            Message::InsightsMostUsed => "Most used".to_string(),
            Message::InsightsStreak => "Streak".to_string(),
            Message::InsightsNoData => "-".to_string(),
            Message::StreakDays(1) => "1 day".to_string(),
            Message::StreakDays(days) => format!("{} days", days),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted, defaults will be used".to_string(),
            Message::ConfigModuleMonitor => "Monitor settings".to_string(),
            Message::ConfigModuleLimits => "Usage limit settings".to_string(),
            Message::PromptSelectModules => "Select settings to configure".to_string(),
            Message::PromptPollInterval => "Poll interval (ms)".to_string(),
            Message::PromptForegroundCacheTtl => "Foreground app cache lifetime (ms)".to_string(),
            Message::PromptAppsCacheTtl => "Monitored apps cache lifetime (ms)".to_string(),
            Message::PromptMaxFailures => "Consecutive failures before the monitor stops".to_string(),
            Message::PromptTerminateBlocked => "Terminate blocked applications?".to_string(),
            Message::PromptDefaultLimit => "Default daily limit for new apps (min, 0 = none)".to_string(),
            Message::PromptWarningInterval => "Continuous use before each warning (min)".to_string(),
            Message::PromptTotalWarnings => "Warnings before blocking".to_string(),
            Message::PromptBlockMinutes => "Block duration (min)".to_string(),
            Message::PromptDailyGoal => "Daily usage goal for streaks (min)".to_string(),

            // === WATCHER MESSAGES ===
            Message::WatcherStarted(pid) => format!("Usage monitor started with PID: {}", pid),
            Message::WatcherStopped(pid) => format!("Usage monitor (PID: {}) stopped", pid),
            Message::WatcherRunning(pid) => format!("Usage monitor is running (PID: {})", pid),
            Message::WatcherNotRunning => "Usage monitor is not running".to_string(),
            Message::WatcherAlreadyRunning(pid) => format!("Usage monitor is already running (PID: {})", pid),
            Message::WatcherStoppingExisting(pid) => format!("Stopping existing usage monitor (PID: {})", pid),
            Message::WatcherFailedToStopExisting(error) => format!("Failed to stop existing usage monitor: {}", error),
            Message::WatcherFailedToStop(pid, error) => format!("Failed to stop process {}: {}", pid, error),
            Message::WatcherForceKilling(pid) => format!("Process {} did not exit in time, force killing", pid),
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT, shutting down".to_string(),
            Message::WatcherReceivedCtrlC => "Received Ctrl+C, shutting down".to_string(),
            Message::WatcherCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::WatcherSignalHandlingNotSupported => "Signal handling is not supported on this platform".to_string(),
            Message::FailedToCreateSignalHandler(error) => format!("Failed to create signal handler: {}", error),
            Message::FailedToGetCurrentExecutable(error) => format!("Failed to get current executable: {}", error),
            Message::DaemonModeNotSupported => "Background mode is not supported on this platform".to_string(),
            Message::InvalidPidFileContent => "Invalid PID file content".to_string(),
            Message::FailedToOpenProcess(code) => format!("Failed to open process (error {})", code),
            Message::FailedToTerminateProcess(code) => format!("Failed to terminate process (error {})", code),
            Message::ProcessTerminationNotSupported => "Process termination is not supported on this platform".to_string(),

            // === MONITOR MESSAGES ===
            Message::MonitorShuttingDown => "Stopping usage monitor".to_string(),
            Message::MonitorExitedNormally => "Usage monitor exited normally".to_string(),
            Message::MonitorFailStopped(failures) => format!("Usage monitor stopped after {} consecutive failures", failures),
            Message::MonitorTaskPanicked(reason) => format!("Usage monitor crashed: {}", reason),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
        };

        write!(f, "{}", text)
    }
}
