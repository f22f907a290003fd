//! Player errors

use reel_dom::{DomError, NodeId};

/// Widget construction error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    #[error("No media element registered for node {0}")]
    UnknownMedia(NodeId),

    #[error("Media element {0} has no parent to wrap it in")]
    Detached(NodeId),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}
