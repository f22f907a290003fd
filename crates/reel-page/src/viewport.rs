//! Viewport scroll state

use reel_dom::{ScrollBehavior, ScrollOptions};

/// Window scroll position
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    scroll_x: f64,
    scroll_y: f64,
    last_behavior: ScrollBehavior,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// `window.pageXOffset`
    pub fn scroll_x(&self) -> f64 {
        self.scroll_x
    }

    /// `window.pageYOffset`
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Behavior of the most recent programmatic scroll
    pub fn last_behavior(&self) -> ScrollBehavior {
        self.last_behavior
    }

    /// `window.scrollTo(options)`. Offsets clamp at zero; smooth scrolls land
    /// immediately. Returns true if the position changed.
    pub fn scroll_to(&mut self, options: &ScrollOptions) -> bool {
        let x = options.left.map_or(self.scroll_x, clamp_offset);
        let y = options.top.map_or(self.scroll_y, clamp_offset);
        self.last_behavior = options.behavior;

        let changed = x != self.scroll_x || y != self.scroll_y;
        self.scroll_x = x;
        self.scroll_y = y;
        changed
    }
}

fn clamp_offset(offset: f64) -> f64 {
    if offset.is_finite() { offset.max(0.0) } else { 0.0 }
}
