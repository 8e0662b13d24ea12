//! Configuration management for appwarden.
//!
//! Settings live in a single JSON file (`config.json`) in the platform data
//! directory resolved by [`DataStorage`]. Every section is optional: a missing
//! file or a missing section falls back to defaults, so the monitor can run
//! without any setup.
//!
//! ## Configuration Structure
//!
//! - **Monitor Config**: polling cadence, cache lifetimes, failure budget and
//!   desktop enforcement switches
//! - **Limits Config**: default daily limit for new apps, warning cadence,
//!   block length and the daily usage goal used by insights
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\lacodda\appwarden\config.json`
//! - **macOS**: `~/Library/Application Support/lacodda/appwarden/config.json`
//! - **Linux**: `~/.local/share/lacodda/appwarden/config.json`
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use appwarden::libs::config::Config;
//!
//! let config = Config::read()?;
//! let monitor = config.monitor.unwrap_or_default();
//! println!("polling every {} ms", monitor.poll_interval);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// A configurable section shown by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Key used to route the selection
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Background monitor settings.
///
/// All durations are in milliseconds.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    /// Delay between two ticks while healthy. After failures the delay is
    /// doubled for every consecutive failure.
    pub poll_interval: u64,

    /// How long a resolved foreground app is trusted before the data
    /// source is queried again.
    pub foreground_cache_ttl: u64,

    /// How long the snapshot of enabled apps is reused. Changes made with
    /// `enable`/`disable`/`limit` while the monitor runs show up after this.
    pub apps_cache_ttl: u64,

    /// Consecutive failing ticks after which the monitor gives up.
    pub max_failures: u32,

    /// Longest gap between two foreground samples that is still counted as
    /// usage. Longer gaps (suspend, stalled host) are dropped. Raised to fit
    /// the poll cadence, see [`MonitorConfig::sample_gap_ms`].
    pub max_sample_gap: u64,

    /// Terminate running processes of a blocked app when the block screen
    /// is presented.
    pub terminate_blocked: bool,
}

impl Default for MonitorConfig {
    /// Defaults: 10 s polling, 4 s foreground cache, 30 s apps cache,
    /// 5 failures, 60 s sample gap, no termination.
    fn default() -> Self {
        MonitorConfig {
            poll_interval: 10_000,
            foreground_cache_ttl: 4_000,
            apps_cache_ttl: 30_000,
            max_failures: 5,
            max_sample_gap: 60_000,
            terminate_blocked: false,
        }
    }
}

impl MonitorConfig {
    /// Sample gap the desktop source actually enforces.
    ///
    /// Never shorter than twice the longest delay the loop can sleep between
    /// two ticks: the poll interval doubled for every failure before the
    /// fail-stop.
    pub fn sample_gap_ms(&self) -> i64 {
        let doublings = self.max_failures.saturating_sub(1);
        let longest_delay = self.poll_interval.saturating_mul(1u64.checked_shl(doublings).unwrap_or(u64::MAX));
        let gap = self.max_sample_gap.max(longest_delay.saturating_mul(2));
        i64::try_from(gap).unwrap_or(i64::MAX)
    }
}

/// Usage limit policy.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Daily limit given to apps added without an explicit `--limit`.
    pub default_limit_minutes: u32,

    /// Continuous usage between two warnings.
    pub warning_interval_minutes: u32,

    /// Warnings delivered before a continuous-use block.
    pub total_warnings: u32,

    /// Length of a block window.
    pub block_minutes: u32,

    /// Daily usage below which a day counts toward the insights streak.
    pub daily_goal_minutes: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            default_limit_minutes: 60,
            warning_interval_minutes: 60,
            total_warnings: 3,
            block_minutes: 60,
            daily_goal_minutes: 240,
        }
    }
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Monitor loop settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<MonitorConfig>,

    /// Limit and warning policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<LimitsConfig>,
}

impl Config {
    /// Reads the configuration from the data directory.
    ///
    /// A missing file is not an error: defaults are returned instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads the configuration from an explicit path.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON into the data directory.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    /// Writes the configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Monitor settings with defaults filled in.
    pub fn monitor_or_default(&self) -> MonitorConfig {
        self.monitor.clone().unwrap_or_default()
    }

    /// Limit settings with defaults filled in.
    pub fn limits_or_default(&self) -> LimitsConfig {
        self.limits.clone().unwrap_or_default()
    }

    /// Runs the interactive setup wizard.
    ///
    /// Starts from the current configuration, lets the user pick which
    /// sections to edit and prompts for each value with the current one as
    /// default. The caller is responsible for saving the result.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let node_descriptions = vec![
            ConfigModule {
                key: "monitor".to_string(),
                name: "Monitor".to_string(),
            },
            ConfigModule {
                key: "limits".to_string(),
                name: "Limits".to_string(),
            },
        ];

        let selected_nodes = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&node_descriptions.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected_nodes {
            match node_descriptions[selection].key.as_str() {
                "monitor" => {
                    let default = config.monitor_or_default();
                    msg_print!(Message::ConfigModuleMonitor);
                    config.monitor = Some(MonitorConfig {
                        poll_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptPollInterval.to_string())
                            .default(default.poll_interval)
                            .interact_text()?,
                        foreground_cache_ttl: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptForegroundCacheTtl.to_string())
                            .default(default.foreground_cache_ttl)
                            .interact_text()?,
                        apps_cache_ttl: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptAppsCacheTtl.to_string())
                            .default(default.apps_cache_ttl)
                            .interact_text()?,
                        max_failures: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptMaxFailures.to_string())
                            .default(default.max_failures)
                            .interact_text()?,
                        max_sample_gap: default.max_sample_gap,
                        terminate_blocked: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTerminateBlocked.to_string())
                            .default(default.terminate_blocked)
                            .interact()?,
                    });
                }
                "limits" => {
                    let default = config.limits_or_default();
                    msg_print!(Message::ConfigModuleLimits);
                    config.limits = Some(LimitsConfig {
                        default_limit_minutes: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptDefaultLimit.to_string())
                            .default(default.default_limit_minutes)
                            .interact_text()?,
                        warning_interval_minutes: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptWarningInterval.to_string())
                            .default(default.warning_interval_minutes)
                            .interact_text()?,
                        total_warnings: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTotalWarnings.to_string())
                            .default(default.total_warnings)
                            .interact_text()?,
                        block_minutes: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptBlockMinutes.to_string())
                            .default(default.block_minutes)
                            .interact_text()?,
                        daily_goal_minutes: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptDailyGoal.to_string())
                            .default(default.daily_goal_minutes)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
