//! Capability query
//!
//! Which optional controls the host platform can actually back.

use crate::{FullscreenManager, MediaRegistry};

/// Platform media capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaCapabilities {
    /// Scripts can change volume (false on some mobile platforms)
    pub volume: bool,
    /// Fullscreen API is available
    pub fullscreen: bool,
}

impl MediaCapabilities {
    /// Query the platform
    pub fn query(registry: &MediaRegistry, fullscreen: &FullscreenManager) -> Self {
        Self {
            volume: registry.volume_supported(),
            fullscreen: fullscreen.is_supported(),
        }
    }

    /// Everything available
    pub fn all() -> Self {
        Self { volume: true, fullscreen: true }
    }
}

impl Default for MediaCapabilities {
    fn default() -> Self {
        Self::all()
    }
}
