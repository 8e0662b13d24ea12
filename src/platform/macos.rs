//! Foreground detection through System Events.

use super::ForegroundProbe;
use crate::libs::app::AppId;
use crate::libs::error::{WardenError, WardenResult};
use std::process::Command;

const FRONTMOST_SCRIPT: &str =
    "tell application \"System Events\" to get name of first application process whose frontmost is true";

#[derive(Debug, Default)]
pub struct FrontmostProbe;

impl ForegroundProbe for FrontmostProbe {
    fn foreground_app(&mut self) -> WardenResult<Option<AppId>> {
        let output = Command::new("osascript")
            .args(["-e", FRONTMOST_SCRIPT])
            .output()
            .map_err(|e| WardenError::Source(format!("osascript: {e}")))?;
        if !output.status.success() {
            return Ok(None);
        }
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!name.is_empty()).then_some(name))
    }
}
