//! Media registry
//!
//! Playback state for every media node in a document, keyed by node.

use std::collections::BTreeMap;
use std::time::Duration;

use reel_dom::{EventType, NodeId};

use crate::HTMLMediaElement;

/// Media elements by DOM node
#[derive(Debug)]
pub struct MediaRegistry {
    elements: BTreeMap<NodeId, HTMLMediaElement>,
    /// Whether the platform lets scripts change volume
    volume_supported: bool,
}

impl MediaRegistry {
    pub fn new() -> Self {
        Self {
            elements: BTreeMap::new(),
            volume_supported: true,
        }
    }

    /// Attach media state to a node, replacing any previous state
    pub fn insert(&mut self, node: NodeId, media: HTMLMediaElement) {
        self.elements.insert(node, media);
    }

    pub fn get(&self, node: NodeId) -> Option<&HTMLMediaElement> {
        self.elements.get(&node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut HTMLMediaElement> {
        self.elements.get_mut(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.elements.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn volume_supported(&self) -> bool {
        self.volume_supported
    }

    pub fn set_volume_supported(&mut self, supported: bool) {
        self.volume_supported = supported;
    }

    /// Run every element's playback clock
    pub fn advance(&mut self, dt: Duration) {
        for media in self.elements.values_mut() {
            media.advance(dt);
        }
    }

    /// Check any element has events queued
    pub fn has_pending_events(&self) -> bool {
        self.elements.values().any(HTMLMediaElement::has_pending_events)
    }

    /// Drain queued events, grouped by node in node order
    pub fn take_events(&mut self) -> Vec<(NodeId, EventType)> {
        let mut out = Vec::new();
        for (&node, media) in self.elements.iter_mut() {
            out.extend(media.take_events().into_iter().map(|e| (node, e)));
        }
        out
    }

    /// Number of elements currently playing
    pub fn playing_count(&self) -> usize {
        self.elements.values().filter(|m| !m.paused()).count()
    }
}

impl Default for MediaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_dom::DomTree;

    #[test]
    fn test_take_events_in_node_order() {
        let mut tree = DomTree::new();
        let first = tree.create_element("video");
        let second = tree.create_element("audio");

        let mut registry = MediaRegistry::new();
        registry.insert(second, HTMLMediaElement::with_src("a.mp3"));
        registry.insert(first, HTMLMediaElement::with_src("b.mp4"));

        registry.get_mut(second).unwrap().play().unwrap();
        registry.get_mut(first).unwrap().play().unwrap();

        assert_eq!(registry.playing_count(), 2);
        assert_eq!(
            registry.take_events(),
            vec![(first, EventType::Play), (second, EventType::Play)]
        );
        assert!(!registry.has_pending_events());
    }
}
