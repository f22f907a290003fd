//! Geometry APIs
//!
//! DOMRect, getBoundingClientRect, and scroll options.

/// DOMRect - rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Left edge (same as x)
    pub fn left(&self) -> f64 {
        self.x
    }
}

/// Element geometry state, filled in by whatever lays the page out
#[derive(Debug, Clone, Default)]
pub struct ElementGeometry {
    // Offset properties (document coordinates)
    pub offset_top: f64,
    pub offset_left: f64,
    pub offset_width: f64,
    pub offset_height: f64,
}

impl ElementGeometry {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            offset_top: top,
            offset_left: left,
            offset_width: width,
            offset_height: height,
        }
    }

    /// Get bounding client rect
    pub fn bounding_client_rect(&self) -> DOMRect {
        DOMRect::from_xywh(
            self.offset_left,
            self.offset_top,
            self.offset_width,
            self.offset_height,
        )
    }
}

/// Scroll behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// Scroll options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollOptions {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub behavior: ScrollBehavior,
}
