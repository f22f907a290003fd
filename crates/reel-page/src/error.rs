//! Page errors

use reel_dom::DomError;
use reel_player::PlayerError;

/// Page runtime error
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Player error: {0}")]
    Player(#[from] PlayerError),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("Page already initialized")]
    AlreadyInitialized,
}
