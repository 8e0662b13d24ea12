//! Foreground detection through the Win32 foreground window.

use super::{process_name, ForegroundProbe};
use crate::libs::app::AppId;
use crate::libs::error::WardenResult;
use winapi::um::winuser::{GetForegroundWindow, GetWindowThreadProcessId};

#[derive(Debug, Default)]
pub struct ForegroundWindowProbe;

impl ForegroundProbe for ForegroundWindowProbe {
    fn foreground_app(&mut self) -> WardenResult<Option<AppId>> {
        let mut pid: u32 = 0;
        unsafe {
            let hwnd = GetForegroundWindow();
            if hwnd.is_null() {
                return Ok(None);
            }
            GetWindowThreadProcessId(hwnd, &mut pid);
        }
        if pid == 0 {
            return Ok(None);
        }
        Ok(process_name(pid))
    }
}
