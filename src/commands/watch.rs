//! Start, stop or inspect the background usage monitor.

use crate::libs::daemon;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Run in the current terminal instead of detaching
    #[arg(short, long, conflicts_with_all = ["stop", "status"])]
    foreground: bool,
    /// Stop the running monitor
    #[arg(long, conflicts_with = "status")]
    stop: bool,
    /// Show whether the monitor is running
    #[arg(long)]
    status: bool,
}

pub async fn cmd(args: WatchArgs) -> Result<()> {
    if args.stop {
        daemon::stop()
    } else if args.status {
        daemon::status()
    } else if args.foreground {
        daemon::run_foreground().await
    } else {
        daemon::spawn()
    }
}
