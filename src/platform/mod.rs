//! Host integration: which application is in front, and process control.
//!
//! Applications are identified by their process name (`firefox`,
//! `Telegram`, `chrome.exe`). Each platform module resolves the foreground
//! window to a process id and [`process_name`] turns that into an id.

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub mod inhibit;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod windows;

use crate::libs::app::AppId;
use crate::libs::error::WardenResult;
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Reports the application currently in front.
pub trait ForegroundProbe: Send {
    fn foreground_app(&mut self) -> WardenResult<Option<AppId>>;
}

/// The probe for the current platform.
#[cfg(target_os = "linux")]
pub fn probe() -> Box<dyn ForegroundProbe> {
    Box::new(linux::X11Probe::default())
}

#[cfg(target_os = "macos")]
pub fn probe() -> Box<dyn ForegroundProbe> {
    Box::new(macos::FrontmostProbe)
}

#[cfg(target_os = "windows")]
pub fn probe() -> Box<dyn ForegroundProbe> {
    Box::new(windows::ForegroundWindowProbe)
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub fn probe() -> Box<dyn ForegroundProbe> {
    Box::new(NullProbe)
}

/// Probe for hosts without foreground detection; never sees an app.
#[derive(Debug, Default)]
pub struct NullProbe;

impl ForegroundProbe for NullProbe {
    fn foreground_app(&mut self) -> WardenResult<Option<AppId>> {
        Ok(None)
    }
}

/// Name of a running process.
pub fn process_name(pid: u32) -> Option<String> {
    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system.process(pid).map(|p| p.name().to_string_lossy().into_owned())
}

pub fn is_process_alive(pid: u32) -> bool {
    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system.process(pid).is_some()
}

/// Kills every process whose name matches `name` and returns how many were
/// signalled.
pub fn terminate_by_name(name: &str) -> usize {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);
    system
        .processes()
        .values()
        .filter(|p| p.name().to_string_lossy().eq_ignore_ascii_case(name))
        .filter(|p| p.kill())
        .count()
}
