//! DOM Node
//!
//! Nodes link to parent and siblings by `NodeId` rather than pointers, so
//! the whole tree lives in one arena and can be borrowed piecewise.

use crate::{CssStyleDeclaration, DOMTokenList, ElementGeometry, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes other than `class`, in insertion order
    attrs: Vec<(String, String)>,
    /// The `class` attribute, kept as a token list
    pub class_list: DOMTokenList,
    /// Inline style
    pub style: CssStyleDeclaration,
    /// Layout box as reported by the host
    pub geometry: ElementGeometry,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            class_list: DOMTokenList::new(),
            style: CssStyleDeclaration::new(),
            geometry: ElementGeometry::default(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<String> {
        if name == "class" {
            return Some(self.class_list.value());
        }
        self.attrs.iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    /// Check for an attribute without cloning it
    pub fn has_attr(&self, name: &str) -> bool {
        if name == "class" {
            return self.class_list.length() > 0;
        }
        self.attrs.iter().any(|(n, _)| n == name)
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if name == "class" {
            self.class_list.set_value(value);
            return;
        }
        if let Some(attr) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            attr.1 = value.to_string();
            return;
        }
        self.attrs.push((name.to_string(), value.to_string()));
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(n, _)| n == name)?;
        Some(self.attrs.remove(pos).1)
    }

    /// `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attrs.iter()
            .find(|(n, _)| n == "id")
            .map(|(_, v)| v.as_str())
    }

    /// Iterate attributes (excluding `class`)
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}
