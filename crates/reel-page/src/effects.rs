//! Cosmetic effects: hero typewriter, logo glitch, page stylesheet

use std::time::Duration;

use reel_dom::{DomResult, DomTree, NodeId};

use crate::config::css_seconds;
use crate::scroll::HERO_CLASS;

pub const BRAND_CLASS: &str = "navbar-brand";

/// Marks the injected stylesheet so it is only added once
const STYLESHEET_MARKER: &str = "data-reel-styles";

pub const PAGE_STYLESHEET: &str = r#"
@keyframes glitch {
    0%, 100% { text-shadow: 0 0 5px var(--accent); }
    20% { text-shadow: 3px 0 5px var(--accent), -3px 0 5px var(--error); }
    40% { text-shadow: -3px 0 5px var(--accent), 3px 0 5px var(--success); }
    60% { text-shadow: 0 3px 5px var(--accent), 0 -3px 5px var(--warning); }
    80% { text-shadow: 0 0 10px var(--accent); }
}

@keyframes fadeOut {
    from { opacity: 1; transform: translateY(0); }
    to { opacity: 0; transform: translateY(-20px); }
}

.video-modal {
    display: none;
    position: fixed;
    top: 0;
    left: 0;
    width: 100%;
    height: 100%;
    background: rgba(0, 0, 0, 0.95);
    z-index: 10000;
    align-items: center;
    justify-content: center;
}

.modal-content {
    position: relative;
    width: 90%;
    max-width: 1200px;
}

.modal-close {
    position: absolute;
    top: -40px;
    right: 0;
    color: white;
    font-size: 2rem;
    cursor: pointer;
    transition: all 0.3s ease;
}

.modal-close:hover {
    color: var(--accent);
    transform: rotate(90deg);
}
"#;

/// First `h1` inside a `.hero` section
pub fn hero_headline(dom: &DomTree) -> Option<NodeId> {
    dom.get_elements_by_class_name(HERO_CLASS).into_iter()
        .flat_map(|hero| dom.descendants(hero))
        .find(|&node| dom.element(node).is_some_and(|el| el.tag == "h1"))
}

/// Retypes a headline one character at a time
#[derive(Debug, Clone)]
pub struct Typewriter {
    target: NodeId,
    text: Vec<char>,
    typed: usize,
}

impl Typewriter {
    /// Capture the current text of `target`
    pub fn new(dom: &DomTree, target: NodeId) -> Self {
        Self {
            target,
            text: dom.text_content(target).chars().collect(),
            typed: 0,
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.typed >= self.text.len()
    }

    /// Type the next character. The first step clears the headline.
    ///
    /// Returns true while characters remain.
    pub fn step(&mut self, dom: &mut DomTree) -> DomResult<bool> {
        if self.typed < self.text.len() {
            self.typed += 1;
        }
        let shown: String = self.text[..self.typed].iter().collect();
        dom.set_text_content(self.target, &shown)?;
        Ok(!self.is_done())
    }
}

/// Start the logo glitch animation
pub fn start_glitch(dom: &mut DomTree, logo: NodeId, duration: Duration) -> DomResult<()> {
    dom.set_style(logo, "animation", &format!("glitch {} ease", css_seconds(duration)))
}

pub fn clear_animation(dom: &mut DomTree, node: NodeId) -> DomResult<()> {
    dom.set_style(node, "animation", "")
}

/// Append the page stylesheet to `head`, creating `head` if needed.
///
/// Returns the style element, or `None` if it was already present.
pub fn inject_stylesheet(dom: &mut DomTree) -> DomResult<Option<NodeId>> {
    let existing = dom.get_elements_by_tag_name("style").into_iter()
        .any(|style| dom.element(style).is_some_and(|el| el.has_attr(STYLESHEET_MARKER)));
    if existing {
        return Ok(None);
    }

    let head = match dom.get_elements_by_tag_name("head").first() {
        Some(&head) => head,
        None => {
            let parent = dom.get_elements_by_tag_name("html").first().copied().unwrap_or(dom.root());
            let head = dom.create_element("head");
            let first = dom.children(parent).next().map(|(id, _)| id);
            dom.insert_before(parent, head, first)?
        }
    };

    let style = dom.append_element(head, "style", &[(STYLESHEET_MARKER, "")])?;
    dom.set_text_content(style, PAGE_STYLESHEET)?;
    Ok(Some(style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typewriter_retypes_headline() {
        let mut dom = DomTree::new();
        let hero = dom.append_element(dom.root(), "section", &[("class", HERO_CLASS)]).unwrap();
        let inner = dom.append_element(hero, "div", &[]).unwrap();
        let h1 = dom.append_element(inner, "h1", &[]).unwrap();
        dom.set_text_content(h1, "Dex").unwrap();

        assert_eq!(hero_headline(&dom), Some(h1));

        let mut typewriter = Typewriter::new(&dom, h1);
        assert!(typewriter.step(&mut dom).unwrap());
        assert_eq!(dom.text_content(h1), "D");
        assert!(typewriter.step(&mut dom).unwrap());
        assert_eq!(dom.text_content(h1), "De");
        assert!(!typewriter.step(&mut dom).unwrap());
        assert_eq!(dom.text_content(h1), "Dex");
        assert!(typewriter.is_done());
    }

    #[test]
    fn test_typewriter_multibyte() {
        let mut dom = DomTree::new();
        let h1 = dom.append_element(dom.root(), "h1", &[]).unwrap();
        dom.set_text_content(h1, "Ñó").unwrap();

        let mut typewriter = Typewriter::new(&dom, h1);
        typewriter.step(&mut dom).unwrap();
        assert_eq!(dom.text_content(h1), "Ñ");
    }

    #[test]
    fn test_typewriter_empty_headline() {
        let mut dom = DomTree::new();
        let h1 = dom.append_element(dom.root(), "h1", &[]).unwrap();

        let mut typewriter = Typewriter::new(&dom, h1);
        assert!(typewriter.is_done());
        assert!(!typewriter.step(&mut dom).unwrap());
    }

    #[test]
    fn test_no_headline_outside_hero() {
        let mut dom = DomTree::new();
        dom.append_element(dom.root(), "h1", &[]).unwrap();
        assert_eq!(hero_headline(&dom), None);
    }

    #[test]
    fn test_glitch_animation() {
        let mut dom = DomTree::new();
        let logo = dom.append_element(dom.root(), "a", &[("class", BRAND_CLASS)]).unwrap();

        start_glitch(&mut dom, logo, Duration::from_millis(300)).unwrap();
        assert_eq!(dom.style(logo, "animation"), Some("glitch 0.3s ease"));
        clear_animation(&mut dom, logo).unwrap();
        assert_eq!(dom.style(logo, "animation"), None);
    }

    #[test]
    fn test_stylesheet_injected_once() {
        let mut dom = DomTree::new();
        let html = dom.append_element(dom.root(), "html", &[]).unwrap();
        let body = dom.append_element(html, "body", &[]).unwrap();

        let style = inject_stylesheet(&mut dom).unwrap().unwrap();
        let head = dom.parent(style);
        assert_eq!(dom.element(head).unwrap().tag, "head");
        assert_eq!(dom.children(html).map(|(id, _)| id).collect::<Vec<_>>(), vec![head, body]);
        assert!(dom.text_content(style).contains("@keyframes glitch"));
        assert!(dom.text_content(style).contains("@keyframes fadeOut"));

        assert_eq!(inject_stylesheet(&mut dom).unwrap(), None);
        assert_eq!(dom.get_elements_by_tag_name("style").len(), 1);
    }
}
