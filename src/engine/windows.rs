use super::PointerEngine;
use anyhow::{Result, anyhow};
use log::{debug, warn};
use std::mem::size_of;
use windows::Win32::System::Threading::{
    GetCurrentThread, SetThreadPriority, THREAD_PRIORITY_HIGHEST,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_MOVE, MOUSEINPUT, SendInput,
};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

/// Absolute mouse coordinates span 0..=65535 across the primary screen.
const ABSOLUTE_RANGE: f64 = 65535.0;

#[derive(Clone, Debug)]
pub struct WindowsEngine {
    pub elevate_thread_priority: bool,
}

impl WindowsEngine {
    pub fn new() -> Self {
        Self {
            elevate_thread_priority: true,
        }
    }

    fn normalize(pos: i32, extent: i32) -> i32 {
        if extent <= 0 {
            return 0;
        }
        ((pos as f64 / extent as f64) * ABSOLUTE_RANGE).round() as i32
    }
}

impl Default for WindowsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerEngine for WindowsEngine {
    fn screen_size(&self) -> (i32, i32) {
        unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
    }

    fn move_to(&self, x: i32, y: i32) -> Result<()> {
        let (width, height) = self.screen_size();
        let input = INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx: Self::normalize(x, width),
                    dy: Self::normalize(y, height),
                    mouseData: 0,
                    dwFlags: MOUSEEVENTF_MOVE | MOUSEEVENTF_ABSOLUTE,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };

        let sent = unsafe { SendInput(&[input], size_of::<INPUT>() as i32) };
        if sent == 1 {
            Ok(())
        } else {
            Err(anyhow!("SendInput failed for pointer move to ({}, {})", x, y))
        }
    }

    fn prepare_playback_thread(&self) {
        if !self.elevate_thread_priority {
            return;
        }

        let ok = unsafe { SetThreadPriority(GetCurrentThread(), THREAD_PRIORITY_HIGHEST) };
        if ok.is_ok() {
            debug!("Playback thread priority set to HIGHEST..!");
        } else {
            warn!("Failed to set playback thread priority..!");
        }
    }
}
