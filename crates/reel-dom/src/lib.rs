//! reel DOM - Document Object Model
//!
//! Arena-based document tree plus the small host surface the player and
//! page scripts need: class lists, inline styles, geometry, events and
//! one-shot timers.

mod node;
mod tree;
mod classlist;
mod style;
mod geometry;
mod events;
mod timers;

pub use node::{Node, NodeData, ElementData};
pub use tree::{DomTree, DomError, DomResult};
pub use classlist::DOMTokenList;
pub use style::CssStyleDeclaration;
pub use geometry::{DOMRect, ElementGeometry, ScrollBehavior, ScrollOptions};
pub use events::{Event, EventType};
pub use timers::{TimerId, TimerQueue};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
