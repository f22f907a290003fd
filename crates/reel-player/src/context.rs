//! Widget context
//!
//! The slice of the page a widget touches while handling one event.

use reel_dom::{DomTree, NodeId, TimerQueue};
use reel_media::{FullscreenManager, MediaRegistry};

/// Deferred work a widget schedules on the page's timer queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetTask {
    /// Fade out the controls of the widget owning `wrapper`
    HideControls { wrapper: NodeId },
}

/// Borrowed page state handed to widget handlers
pub struct WidgetContext<'a, T> {
    pub dom: &'a mut DomTree,
    pub media: &'a mut MediaRegistry,
    pub fullscreen: &'a mut FullscreenManager,
    pub timers: &'a mut TimerQueue<T>,
}

impl<'a, T> WidgetContext<'a, T> {
    pub fn new(
        dom: &'a mut DomTree,
        media: &'a mut MediaRegistry,
        fullscreen: &'a mut FullscreenManager,
        timers: &'a mut TimerQueue<T>,
    ) -> Self {
        Self { dom, media, fullscreen, timers }
    }
}
