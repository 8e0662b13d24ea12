//! Suspend inhibition through a `systemd-inhibit` child process.

use crate::libs::error::{WardenError, WardenResult};
use crate::libs::wake_lock::WakeLock;
use std::process::{Child, Command, Stdio};
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct InhibitLock {
    child: Option<Child>,
}

impl InhibitLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WakeLock for InhibitLock {
    fn acquire(&mut self) -> WardenResult<()> {
        if self.child.is_some() {
            return Ok(());
        }
        let child = Command::new("systemd-inhibit")
            .args([
                "--what=sleep:idle",
                "--who=appwarden",
                "--why=Monitoring application usage",
                "--mode=block",
                "sleep",
                "infinity",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| WardenError::WakeLock(format!("systemd-inhibit: {e}")))?;
        debug!(pid = child.id(), "wake lock acquired");
        self.child = Some(child);
        Ok(())
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                warn!(error = %e, "failed to stop systemd-inhibit");
            }
            let _ = child.wait();
            debug!("wake lock released");
        }
    }
}

impl Drop for InhibitLock {
    fn drop(&mut self) {
        self.release();
    }
}
