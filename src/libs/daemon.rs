//! Background process management for the watch command.
//!
//! `appwarden watch` re-executes the binary with [`DAEMON_FLAG`] as a
//! detached process and records its PID in the data directory. The daemon
//! runs the usage monitor until it receives SIGTERM/SIGINT (Ctrl-C on
//! Windows) or the monitor fail-stops, and removes the PID file on every
//! exit path so `watch --status` never reports a dead process as running.

use crate::db::apps::Apps;
use crate::db::db::Db;
use crate::db::samples::Samples;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::effects::DesktopEffects;
use crate::libs::messages::Message;
use crate::libs::monitor::{Monitor, RunOutcome};
use crate::libs::source::DesktopSource;
use crate::libs::wake_lock::platform_wake_lock;
use crate::platform::is_process_alive;
use crate::{msg_bail_anyhow, msg_error, msg_error_anyhow, msg_info, msg_warning};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const PID_FILE: &str = "appwarden-watch.pid";

/// Hidden argument that makes the binary run the monitor in-process.
pub const DAEMON_FLAG: &str = "--daemon-run";

/// State of the background monitor according to its PID file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchStatus {
    Running(u32),
    NotRunning,
    /// A PID file whose process is gone.
    Stale(u32),
}

pub fn pid_path() -> Result<PathBuf> {
    Ok(DataStorage::new().get_path(PID_FILE)?)
}

/// Builds the monitor with the desktop collaborators and the user's config.
pub fn build_monitor() -> Result<Monitor> {
    let config = Config::read()?;
    let monitor_config = config.monitor_or_default();
    let conn = Db::new()?.shared();

    let store = Apps::from_shared(conn.clone());
    let source = DesktopSource::new(Samples::from_shared(conn), monitor_config.sample_gap_ms());
    let effects = DesktopEffects::new(monitor_config.terminate_blocked);

    Ok(Monitor::from_config(&config, Box::new(store), Box::new(source), Box::new(effects)).with_wake_lock(platform_wake_lock()))
}

/// Runs the monitor until a shutdown signal or a fail-stop, then removes
/// the PID file.
pub async fn run_with_signal_handling() -> Result<()> {
    let pid_path = pid_path()?;
    let result = run_until_shutdown().await;
    remove_pid_file(&pid_path);
    result
}

/// Runs the monitor attached to the terminal, registered in the PID file.
pub async fn run_foreground() -> Result<()> {
    let pid_path = pid_path()?;
    if let WatchStatus::Running(pid) = status_at(&pid_path)? {
        msg_bail_anyhow!(Message::WatcherAlreadyRunning(pid));
    }
    std::fs::write(&pid_path, std::process::id().to_string())?;
    msg_info!(Message::WatcherStarted(std::process::id()));
    run_with_signal_handling().await
}

async fn run_until_shutdown() -> Result<()> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    #[cfg(unix)]
    {
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let (mut sigterm, mut sigint) = match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
                (Err(e), _) | (_, Err(e)) => {
                    msg_error!(Message::FailedToCreateSignalHandler(e.to_string()));
                    std::future::pending::<()>().await;
                    return;
                }
            };

            tokio::select! {
                _ = sigterm.recv() => {
                    msg_info!(Message::WatcherReceivedSigterm);
                }
                _ = sigint.recv() => {
                    msg_info!(Message::WatcherReceivedSigint);
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    msg_info!(Message::WatcherReceivedCtrlC);
                    let _ = shutdown_tx.send(());
                }
                Err(e) => {
                    msg_error!(Message::WatcherCtrlCListenFailed(e.to_string()));
                    std::future::pending::<()>().await;
                }
            }
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        msg_warning!(Message::WatcherSignalHandlingNotSupported);
        drop(shutdown_tx);
    }

    let mut handle = build_monitor()?.start();

    let finished = tokio::select! {
        outcome = handle.join() => Some(outcome),
        Ok(()) = shutdown_rx => None,
    };
    let outcome = match finished {
        Some(outcome) => outcome,
        None => {
            msg_info!(Message::MonitorShuttingDown);
            handle.stop().await
        }
    };

    match outcome {
        RunOutcome::Stopped => {
            msg_info!(Message::MonitorExitedNormally);
            Ok(())
        }
        RunOutcome::FailStopped { failures } => Err(msg_error_anyhow!(Message::MonitorFailStopped(failures))),
        RunOutcome::Crashed(reason) => Err(msg_error_anyhow!(Message::MonitorTaskPanicked(reason))),
    }
}

/// Starts the monitor as a detached background process, replacing a
/// running one.
pub fn spawn() -> Result<()> {
    let pid_path = pid_path()?;

    if pid_path.exists() {
        if let Ok(pid_str) = std::fs::read_to_string(&pid_path) {
            msg_info!(Message::WatcherStoppingExisting(pid_str.trim().to_string()));
            if let Err(e) = stop_at(&pid_path) {
                msg_warning!(Message::WatcherFailedToStopExisting(e.to_string()));
                remove_pid_file(&pid_path);
            }
            std::thread::sleep(Duration::from_millis(1000));
        }
    }

    let current_exe = std::env::current_exe().map_err(|e| msg_error_anyhow!(Message::FailedToGetCurrentExecutable(e.to_string())))?;

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let mut command = std::process::Command::new(current_exe);
        command.arg(DAEMON_FLAG);
        // SAFETY: setsid is async-signal-safe and touches no parent state.
        unsafe {
            command.pre_exec(|| {
                nix::unistd::setsid()?;
                Ok(())
            });
        }
        let child = command.spawn()?;
        let pid = child.id();
        std::fs::write(&pid_path, pid.to_string())?;
        msg_info!(Message::WatcherStarted(pid));
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        let child = std::process::Command::new(current_exe)
            .arg(DAEMON_FLAG)
            .creation_flags(CREATE_NO_WINDOW)
            .spawn()?;
        let pid = child.id();
        std::fs::write(&pid_path, pid.to_string())?;
        msg_info!(Message::WatcherStarted(pid));
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = current_exe;
        msg_bail_anyhow!(Message::DaemonModeNotSupported);
    }

    Ok(())
}

/// Stops the running daemon, if any.
pub fn stop() -> Result<()> {
    match stop_at(&pid_path()?)? {
        Some(pid) => msg_info!(Message::WatcherStopped(pid)),
        None => msg_info!(Message::WatcherNotRunning),
    }
    Ok(())
}

/// Prints whether the daemon is running.
pub fn status() -> Result<()> {
    let pid_path = pid_path()?;
    match status_at(&pid_path)? {
        WatchStatus::Running(pid) => msg_info!(Message::WatcherRunning(pid)),
        WatchStatus::NotRunning => msg_info!(Message::WatcherNotRunning),
        WatchStatus::Stale(_) => {
            remove_pid_file(&pid_path);
            msg_info!(Message::WatcherNotRunning);
        }
    }
    Ok(())
}

/// Stops the process recorded in `pid_path` and removes the file.
///
/// Returns the PID that was stopped, `None` when nothing was running.
pub fn stop_at(pid_path: &Path) -> Result<Option<u32>> {
    if !pid_path.exists() {
        return Ok(None);
    }

    let pid = read_pid(pid_path)?;
    let killed = kill_process(pid)?;

    // The daemon removes its own PID file on a graceful exit.
    remove_pid_file(pid_path);

    Ok(killed.then_some(pid))
}

pub fn status_at(pid_path: &Path) -> Result<WatchStatus> {
    if !pid_path.exists() {
        return Ok(WatchStatus::NotRunning);
    }
    let pid = read_pid(pid_path)?;
    if is_process_alive(pid) {
        Ok(WatchStatus::Running(pid))
    } else {
        Ok(WatchStatus::Stale(pid))
    }
}

fn read_pid(pid_path: &Path) -> Result<u32> {
    let pid_str = std::fs::read_to_string(pid_path)?;
    match pid_str.trim().parse::<u32>() {
        Ok(pid) if pid > 0 && i32::try_from(pid).is_ok() => Ok(pid),
        _ => Err(msg_error_anyhow!(Message::InvalidPidFileContent)),
    }
}

fn remove_pid_file(pid_path: &Path) {
    if pid_path.exists() {
        let _ = std::fs::remove_file(pid_path);
    }
}

#[cfg(windows)]
fn kill_process(pid: u32) -> Result<bool> {
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
    use winapi::um::winnt::PROCESS_TERMINATE;

    unsafe {
        let handle = OpenProcess(PROCESS_TERMINATE, 0, pid);
        if handle.is_null() {
            let error = GetLastError();
            if error == 87 {
                // ERROR_INVALID_PARAMETER: no such process
                return Ok(false);
            }
            msg_bail_anyhow!(Message::FailedToOpenProcess(error));
        }

        let result = TerminateProcess(handle, 0);
        CloseHandle(handle);

        if result == 0 {
            let error = GetLastError();
            msg_bail_anyhow!(Message::FailedToTerminateProcess(error));
        }
        std::thread::sleep(Duration::from_millis(100));
        Ok(true)
    }
}

#[cfg(unix)]
fn kill_process(pid: u32) -> Result<bool> {
    use nix::errno::Errno;
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let target = Pid::from_raw(i32::try_from(pid).map_err(|_| msg_error_anyhow!(Message::InvalidPidFileContent))?);

    match kill(target, Signal::SIGTERM) {
        Ok(()) => {}
        Err(Errno::ESRCH) => return Ok(false),
        Err(e) => msg_bail_anyhow!(Message::WatcherFailedToStop(pid, e.to_string())),
    }

    // The monitor finishes its current tick before exiting.
    for _ in 0..30 {
        std::thread::sleep(Duration::from_millis(100));
        if matches!(kill(target, None), Err(Errno::ESRCH)) || !is_process_alive(pid) {
            return Ok(true);
        }
    }

    msg_warning!(Message::WatcherForceKilling(pid));
    match kill(target, Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => msg_bail_anyhow!(Message::WatcherFailedToStop(pid, e.to_string())),
    }
    std::thread::sleep(Duration::from_millis(100));
    Ok(true)
}

#[cfg(not(any(unix, windows)))]
fn kill_process(_pid: u32) -> Result<bool> {
    msg_bail_anyhow!(Message::ProcessTerminationNotSupported);
}
