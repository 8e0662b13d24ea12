//! Suspend inhibition held while the monitor runs.

use crate::libs::error::WardenResult;
use tracing::warn;

/// A resource that keeps the host awake while held.
pub trait WakeLock: Send {
    fn acquire(&mut self) -> WardenResult<()>;
    fn release(&mut self);
}

/// Lock for hosts without a suspend-inhibit facility.
#[derive(Debug, Default)]
pub struct NoopWakeLock;

impl WakeLock for NoopWakeLock {
    fn acquire(&mut self) -> WardenResult<()> {
        Ok(())
    }

    fn release(&mut self) {}
}

/// Holds an acquired lock and releases it when dropped, so every exit path
/// of the owner (return, cancellation, panic) gives it back.
pub struct WakeGuard {
    lock: Box<dyn WakeLock>,
    held: bool,
}

impl WakeGuard {
    /// Acquires `lock`. Failure to acquire is logged and yields a guard that
    /// holds nothing; monitoring continues without suspend inhibition.
    pub fn acquire(mut lock: Box<dyn WakeLock>) -> Self {
        let held = match lock.acquire() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "continuing without wake lock");
                false
            }
        };
        Self { lock, held }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

impl Drop for WakeGuard {
    fn drop(&mut self) {
        if self.held {
            self.lock.release();
            self.held = false;
        }
    }
}

/// The wake lock for the current platform.
pub fn platform_wake_lock() -> Box<dyn WakeLock> {
    #[cfg(target_os = "linux")]
    {
        Box::new(crate::platform::inhibit::InhibitLock::new())
    }
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(NoopWakeLock)
    }
}
