//! Scroll-driven behavior: in-page anchors, navbar, hero parallax

use reel_dom::{DomResult, DomTree, NodeId, ScrollBehavior, ScrollOptions};

use crate::config::{NavbarConfig, ParallaxConfig};

pub const NAVBAR_CLASS: &str = "navbar";
pub const HERO_CLASS: &str = "hero";

const NAVBAR_SOLID_BACKGROUND: &str = "rgba(10, 10, 10, 0.98)";
const NAVBAR_SOLID_BLUR: &str = "blur(15px)";
const NAVBAR_CLEAR_BACKGROUND: &str = "rgba(10, 10, 10, 0.95)";
const NAVBAR_CLEAR_BLUR: &str = "blur(10px)";
const NAVBAR_HIDDEN: &str = "translateY(-100%)";
const NAVBAR_SHOWN: &str = "translateY(0)";

/// Check `node` is an `a[href^="#"]`
pub fn is_in_page_anchor(dom: &DomTree, node: NodeId) -> bool {
    dom.element(node).is_some_and(|el| {
        el.tag == "a" && el.get_attr("href").is_some_and(|href| href.starts_with('#'))
    })
}

/// Element an in-page anchor points at
pub fn anchor_target(dom: &DomTree, anchor: NodeId) -> Option<NodeId> {
    let href = dom.get_attribute(anchor, "href")?;
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    dom.get_element_by_id(id)
}

/// Smooth scroll that brings `target` just below a fixed header of height `offset`
pub fn scroll_options_for(dom: &DomTree, target: NodeId, offset: f64) -> ScrollOptions {
    let top = dom.element(target).map_or(0.0, |el| el.geometry.offset_top);
    ScrollOptions {
        top: Some(top - offset),
        left: None,
        behavior: ScrollBehavior::Smooth,
    }
}

/// Navbar that turns solid past a threshold and hides while scrolling down
#[derive(Debug, Clone)]
pub struct Navbar {
    node: NodeId,
    config: NavbarConfig,
    last_scroll: f64,
}

impl Navbar {
    pub fn new(node: NodeId, config: NavbarConfig) -> Self {
        Self { node, config, last_scroll: 0.0 }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn on_scroll(&mut self, dom: &mut DomTree, scroll_y: f64) -> DomResult<()> {
        let (background, blur) = if scroll_y > self.config.solid_after {
            (NAVBAR_SOLID_BACKGROUND, NAVBAR_SOLID_BLUR)
        } else {
            (NAVBAR_CLEAR_BACKGROUND, NAVBAR_CLEAR_BLUR)
        };
        dom.set_style(self.node, "background", background)?;
        dom.set_style(self.node, "backdrop-filter", blur)?;

        let hide = scroll_y > self.last_scroll && scroll_y > self.config.hide_after;
        dom.set_style(self.node, "transform", if hide { NAVBAR_HIDDEN } else { NAVBAR_SHOWN })?;

        self.last_scroll = scroll_y;
        Ok(())
    }
}

/// Hero sections translated by a fraction of the scroll offset
#[derive(Debug, Clone)]
pub struct Parallax {
    nodes: Vec<NodeId>,
    speed: f64,
}

impl Parallax {
    pub fn new(nodes: Vec<NodeId>, config: &ParallaxConfig) -> Self {
        Self { nodes, speed: config.speed }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn on_scroll(&self, dom: &mut DomTree, scroll_y: f64) -> DomResult<()> {
        let transform = format!("translateY({}px)", scroll_y * self.speed);
        for &node in &self.nodes {
            dom.set_style(node, "transform", &transform)?;
        }
        Ok(())
    }
}
