//! reel Media
//!
//! Platform media primitives the player widget wraps:
//! - HTMLMediaElement state and its event queue
//! - Per-node media registry
//! - Fullscreen requests with asynchronous settlement
//! - Capability query

pub mod element;
pub mod registry;
pub mod fullscreen;
pub mod capabilities;

pub use element::{HTMLMediaElement, MediaSnapshot, NetworkState, ReadyState};
pub use registry::MediaRegistry;
pub use fullscreen::{
    FullscreenError, FullscreenKind, FullscreenManager, FullscreenOutcome,
};
pub use capabilities::MediaCapabilities;

/// Media error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}
