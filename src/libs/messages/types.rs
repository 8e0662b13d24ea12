/// Every user-facing message of the application.
///
/// Text lives in [`display`](super::display); call sites only pick a variant
/// and its parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === APP MESSAGES ===
    AppAdded(String, u32), // id, limit in minutes
    AppUpdated(String),
    AppRemoved(String),
    AppEnabled(String),
    AppDisabled(String),
    AppLimitChanged(String, u32),
    AppNotMonitored(String),
    AppsHeader,
    NoAppsMonitored,
    ConfirmRemoveApp(String),
    OperationCancelled,

    // === TABLE STATES ===
    StateActive,
    StateDisabled,
    StateOverLimit,
    StateBlocked(String), // remaining countdown

    // === USAGE NOTIFICATIONS ===
    ContinuousUsageWarning { app: String, ordinal: u32, total: u32 },
    UsageLimitReached(String),
    AppBlocked { app: String, remaining: String },

    // === INSIGHTS MESSAGES ===
    InsightsHeader,
    InsightsTotal,
    InsightsAverage,
    InsightsMostUsed,
    InsightsStreak,
    InsightsNoData,
    StreakDays(u32),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleMonitor,
    ConfigModuleLimits,
    PromptSelectModules,
    PromptPollInterval,
    PromptForegroundCacheTtl,
    PromptAppsCacheTtl,
    PromptMaxFailures,
    PromptTerminateBlocked,
    PromptDefaultLimit,
    PromptWarningInterval,
    PromptTotalWarnings,
    PromptBlockMinutes,
    PromptDailyGoal,

    // === WATCHER MESSAGES ===
    WatcherStarted(u32),
    WatcherStopped(u32),
    WatcherRunning(u32),
    WatcherNotRunning,
    WatcherAlreadyRunning(u32),
    WatcherStoppingExisting(String),
    WatcherFailedToStopExisting(String),
    WatcherFailedToStop(u32, String),
    WatcherForceKilling(u32),
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String),
    WatcherSignalHandlingNotSupported,
    FailedToCreateSignalHandler(String),
    FailedToGetCurrentExecutable(String),
    DaemonModeNotSupported,
    InvalidPidFileContent,
    FailedToOpenProcess(u32),      // os error code
    FailedToTerminateProcess(u32), // os error code
    ProcessTerminationNotSupported,

    // === MONITOR MESSAGES ===
    MonitorShuttingDown,
    MonitorExitedNormally,
    MonitorFailStopped(u32),
    MonitorTaskPanicked(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseVersion(u32),
}
