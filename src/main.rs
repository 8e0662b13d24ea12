use appwarden::commands::Cli;
use appwarden::libs::daemon::{self, DAEMON_FLAG};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let daemon_mode = std::env::args().any(|arg| arg == DAEMON_FLAG);

    // The detached monitor has no terminal, its events are the only trace of what it did.
    let default_level = if daemon_mode { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    if daemon_mode {
        return daemon::run_with_signal_handling().await;
    }

    Cli::menu().await
}
