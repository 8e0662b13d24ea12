//! Command-line interface.
//!
//! ## Commands
//!
//! - `init`: configuration wizard
//! - `add`, `remove`: opt applications in and out of monitoring
//! - `limit`, `enable`, `disable`: change an application's policy
//! - `list`: today's usage and state of every application
//! - `insights`: seven-day summary
//! - `watch`: run the usage monitor in the background

pub mod add;
pub mod init;
pub mod insights;
pub mod limit;
pub mod list;
pub mod remove;
pub mod toggle;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Start monitoring an application", arg_required_else_help = true)]
    Add(add::AddArgs),
    #[command(about = "Stop monitoring an application", arg_required_else_help = true)]
    Remove(remove::RemoveArgs),
    #[command(about = "Change the daily limit of an application", arg_required_else_help = true)]
    Limit(limit::LimitArgs),
    #[command(about = "Resume monitoring a disabled application", arg_required_else_help = true)]
    Enable(toggle::ToggleArgs),
    #[command(about = "Pause monitoring of an application", arg_required_else_help = true)]
    Disable(toggle::ToggleArgs),
    #[command(about = "Show monitored applications")]
    List,
    #[command(about = "Show the last seven days of usage")]
    Insights,
    #[command(about = "Run the usage monitor")]
    Watch(watch::WatchArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Add(args) => add::cmd(args),
            Commands::Remove(args) => remove::cmd(args),
            Commands::Limit(args) => limit::cmd(args),
            Commands::Enable(args) => toggle::cmd(args, true),
            Commands::Disable(args) => toggle::cmd(args, false),
            Commands::List => list::cmd(),
            Commands::Insights => insights::cmd(),
            Commands::Watch(args) => watch::cmd(args).await,
        }
    }
}
