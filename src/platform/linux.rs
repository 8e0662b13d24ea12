//! Foreground detection on X11 through `xdotool`, falling back to `xprop`.

use super::{process_name, ForegroundProbe};
use crate::libs::app::AppId;
use crate::libs::error::{WardenError, WardenResult};
use std::io::ErrorKind;
use std::process::Command;
use tracing::debug;

#[derive(Debug, Default)]
pub struct X11Probe {
    xdotool_missing: bool,
}

impl ForegroundProbe for X11Probe {
    fn foreground_app(&mut self) -> WardenResult<Option<AppId>> {
        let pid = if self.xdotool_missing {
            xprop_active_pid()?
        } else {
            match xdotool_active_pid() {
                Err(WardenError::Source(reason)) if reason == "xdotool not installed" => {
                    debug!("xdotool not found, using xprop");
                    self.xdotool_missing = true;
                    xprop_active_pid()?
                }
                other => other?,
            }
        };
        Ok(pid.and_then(process_name))
    }
}

/// Runs a tool and returns its stdout, `None` when it exits unsuccessfully.
fn run(tool: &'static str, args: &[&str]) -> WardenResult<Option<String>> {
    match Command::new(tool).args(args).output() {
        Ok(output) if output.status.success() => Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned())),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(WardenError::Source(format!("{tool} not installed"))),
        Err(e) => Err(WardenError::Source(format!("{tool}: {e}"))),
    }
}

fn xdotool_active_pid() -> WardenResult<Option<u32>> {
    Ok(run("xdotool", &["getactivewindow", "getwindowpid"])?.and_then(|out| out.trim().parse().ok()))
}

fn xprop_active_pid() -> WardenResult<Option<u32>> {
    let Some(root) = run("xprop", &["-root", "_NET_ACTIVE_WINDOW"])? else {
        return Ok(None);
    };
    let Some(window) = parse_active_window(&root) else {
        return Ok(None);
    };
    Ok(run("xprop", &["-id", &window, "_NET_WM_PID"])?.and_then(|out| parse_wm_pid(&out)))
}

/// `_NET_ACTIVE_WINDOW(WINDOW): window id # 0x3c00007`
fn parse_active_window(output: &str) -> Option<String> {
    let id = output.split_whitespace().last()?;
    (id.starts_with("0x") && id != "0x0").then(|| id.to_string())
}

/// `_NET_WM_PID(CARDINAL) = 4242`
fn parse_wm_pid(output: &str) -> Option<u32> {
    output.split('=').nth(1)?.trim().parse().ok()
}
