//! Fullscreen API
//!
//! Requests are asynchronous: `request_fullscreen` and `exit_fullscreen`
//! only queue work, and `settle` later resolves each request to success or
//! failure, the way the platform promise would.

use std::collections::VecDeque;

use reel_dom::NodeId;

/// Fullscreen error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FullscreenError {
    #[error("Fullscreen request denied")]
    NotAllowed,
    #[error("Fullscreen not supported")]
    NotSupported,
    #[error("Document is not in fullscreen")]
    NotFullscreen,
}

/// Direction of a fullscreen transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenKind {
    Enter,
    Exit,
}

/// A settled request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullscreenOutcome {
    /// Element that asked for the transition
    pub requester: NodeId,
    pub kind: FullscreenKind,
    pub result: Result<(), FullscreenError>,
}

/// Fullscreen manager
#[derive(Debug)]
pub struct FullscreenManager {
    fullscreen_element: Option<NodeId>,
    /// Platform implements the API at all
    supported: bool,
    /// Policy currently permits entering fullscreen
    allowed: bool,
    pending: VecDeque<(NodeId, FullscreenKind)>,
}

impl FullscreenManager {
    pub fn new() -> Self {
        Self {
            fullscreen_element: None,
            supported: true,
            allowed: true,
            pending: VecDeque::new(),
        }
    }

    /// `document.fullscreenEnabled`
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn set_supported(&mut self, supported: bool) {
        self.supported = supported;
    }

    pub fn set_allowed(&mut self, allowed: bool) {
        self.allowed = allowed;
    }

    /// `document.fullscreenElement`
    pub fn fullscreen_element(&self) -> Option<NodeId> {
        self.fullscreen_element
    }

    /// Check if in fullscreen
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen_element.is_some()
    }

    /// Queue a request to make `element` fullscreen
    pub fn request_fullscreen(&mut self, element: NodeId) {
        self.pending.push_back((element, FullscreenKind::Enter));
    }

    /// Queue a request to leave fullscreen on behalf of `requester`
    pub fn exit_fullscreen(&mut self, requester: NodeId) {
        self.pending.push_back((requester, FullscreenKind::Exit));
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Resolve every queued request, in order
    pub fn settle(&mut self) -> Vec<FullscreenOutcome> {
        let mut outcomes = Vec::with_capacity(self.pending.len());
        while let Some((requester, kind)) = self.pending.pop_front() {
            let result = match kind {
                FullscreenKind::Enter => self.enter(requester),
                FullscreenKind::Exit => self.exit(),
            };
            if let Err(err) = result {
                tracing::debug!("Fullscreen {:?} for {} rejected: {}", kind, requester, err);
            }
            outcomes.push(FullscreenOutcome { requester, kind, result });
        }
        outcomes
    }

    fn enter(&mut self, element: NodeId) -> Result<(), FullscreenError> {
        if !self.supported {
            return Err(FullscreenError::NotSupported);
        }
        if !self.allowed {
            return Err(FullscreenError::NotAllowed);
        }
        self.fullscreen_element = Some(element);
        Ok(())
    }

    fn exit(&mut self) -> Result<(), FullscreenError> {
        self.fullscreen_element
            .take()
            .map(|_| ())
            .ok_or(FullscreenError::NotFullscreen)
    }
}

impl Default for FullscreenManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_dom::DomTree;

    #[test]
    fn test_fullscreen() {
        let mut tree = DomTree::new();
        let wrapper = tree.create_element("div");
        let mut fs = FullscreenManager::new();

        fs.request_fullscreen(wrapper);
        assert!(!fs.is_fullscreen());
        let outcomes = fs.settle();
        assert_eq!(outcomes[0].result, Ok(()));
        assert_eq!(fs.fullscreen_element(), Some(wrapper));

        fs.exit_fullscreen(wrapper);
        let outcomes = fs.settle();
        assert_eq!(outcomes[0].kind, FullscreenKind::Exit);
        assert!(!fs.is_fullscreen());
    }

    #[test]
    fn test_rejections() {
        let mut tree = DomTree::new();
        let wrapper = tree.create_element("div");
        let mut fs = FullscreenManager::new();

        fs.set_allowed(false);
        fs.request_fullscreen(wrapper);
        fs.exit_fullscreen(wrapper);
        let results: Vec<_> = fs.settle().into_iter().map(|o| o.result).collect();

        assert_eq!(results, vec![Err(FullscreenError::NotAllowed), Err(FullscreenError::NotFullscreen)]);
        assert!(!fs.has_pending());
    }
}
