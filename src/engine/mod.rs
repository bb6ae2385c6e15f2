use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(all(feature = "wininput", target_os = "windows"))]
pub mod windows;

/// Something that can put the pointer at an absolute screen position.
pub trait PointerEngine: Send + Sync {
    /// Screen size in pixels as `(width, height)`.
    fn screen_size(&self) -> (i32, i32);

    fn move_to(&self, x: i32, y: i32) -> anyhow::Result<()>;

    /// Called once from the playback thread before the timing loop starts.
    fn prepare_playback_thread(&self) {}
}

/// Backend that only logs where the pointer would go.
#[derive(Debug)]
pub struct LoggingEngine {
    width: i32,
    height: i32,
    moves: AtomicU64,
}

impl LoggingEngine {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            moves: AtomicU64::new(0),
        }
    }

    pub fn moves(&self) -> u64 {
        self.moves.load(Ordering::Relaxed)
    }
}

impl Default for LoggingEngine {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

impl PointerEngine for LoggingEngine {
    fn screen_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn move_to(&self, x: i32, y: i32) -> anyhow::Result<()> {
        let n = self.moves.fetch_add(1, Ordering::Relaxed);
        info!("Move {}: pointer -> ({}, {})", n, x, y);
        Ok(())
    }
}

#[cfg(all(feature = "wininput", target_os = "windows"))]
pub type DefaultPointerEngine = windows::WindowsEngine;

#[cfg(not(all(feature = "wininput", target_os = "windows")))]
pub type DefaultPointerEngine = LoggingEngine;

/// The real pointer backend when this build has one; otherwise a [`LoggingEngine`]
/// pretending to be a `fallback_screen`-sized display.
#[cfg(all(feature = "wininput", target_os = "windows"))]
pub fn default_engine(_fallback_screen: (i32, i32)) -> DefaultPointerEngine {
    windows::WindowsEngine::new()
}

#[cfg(not(all(feature = "wininput", target_os = "windows")))]
pub fn default_engine(fallback_screen: (i32, i32)) -> DefaultPointerEngine {
    log::warn!("No pointer backend in this build, moves will only be logged..!");
    LoggingEngine::new(fallback_screen.0, fallback_screen.1)
}
