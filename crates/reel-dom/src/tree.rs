//! DOM Tree (arena-based allocation)
//!
//! Core node manipulation: appendChild, insertBefore, removeChild, plus the
//! handful of queries page scripts use (by id, tag, class, closest).

use crate::{DOMRect, ElementData, Node, NodeData, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found: {0}")]
    NotFound(NodeId),
    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Operation needs an element
    #[error("Invalid node type: {0} is not an element")]
    InvalidNodeType(NodeId),
    /// Reference node is not a child of the parent
    #[error("Node {0} is not a child of {1}")]
    NotAChild(NodeId, NodeId),
}

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data for `id`
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data for `id`
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Element data or a typed error
    pub fn try_element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        match self.get_mut(id) {
            None => Err(DomError::NotFound(id)),
            Some(node) => node.as_element_mut().ok_or(DomError::InvalidNodeType(id)),
        }
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true: the document node always exists)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached element with a class attribute
    pub fn create_element_with_class(&mut self, tag: &str, class: &str) -> NodeId {
        let id = self.create_element(tag);
        if let Some(el) = self.element_mut(id) {
            el.class_list.set_value(class);
        }
        id
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create an element with attributes and append it to `parent`
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> DomResult<NodeId> {
        let id = self.create_element(tag);
        if let Some(el) = self.element_mut(id) {
            for (name, value) in attrs {
                el.set_attr(name, value);
            }
        }
        self.append_child(parent, id)
    }

    fn check(&self, id: NodeId) -> DomResult<()> {
        if self.get(id).is_some() {
            Ok(())
        } else {
            Err(DomError::NotFound(id))
        }
    }

    /// Check `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = self.parent(current);
        }
        false
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check(parent)?;
        self.check(child)?;
        if child == NodeId::ROOT || self.is_inclusive_ancestor(child, parent) {
            tracing::trace!("Rejected insert of {} under {}", child, parent);
            return Err(DomError::HierarchyRequest);
        }
        if self.get(parent).is_some_and(Node::is_text) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }

    /// Unlink a node from its parent, keeping its subtree
    fn detach(&mut self, child: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[child.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[child.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Append a child node (moving it if already attached)
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `new_child` before `ref_child`, or at the end when `None`
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.check_insert(parent, new_child)?;
        if let Some(r) = ref_child {
            self.check(r)?;
            if self.parent(r) != parent {
                return Err(DomError::NotAChild(r, parent));
            }
            if r == new_child {
                return Ok(new_child);
            }
        }

        self.detach(new_child);

        match ref_child {
            Some(r) => {
                let prev = self.nodes[r.index()].prev_sibling;
                {
                    let node = &mut self.nodes[new_child.index()];
                    node.parent = parent;
                    node.prev_sibling = prev;
                    node.next_sibling = r;
                }
                self.nodes[r.index()].prev_sibling = new_child;
                if prev.is_valid() {
                    self.nodes[prev.index()].next_sibling = new_child;
                } else {
                    self.nodes[parent.index()].first_child = new_child;
                }
            }
            None => {
                let last = self.nodes[parent.index()].last_child;
                {
                    let node = &mut self.nodes[new_child.index()];
                    node.parent = parent;
                    node.prev_sibling = last;
                }
                if last.is_valid() {
                    self.nodes[last.index()].next_sibling = new_child;
                } else {
                    self.nodes[parent.index()].first_child = new_child;
                }
                self.nodes[parent.index()].last_child = new_child;
            }
        }

        Ok(new_child)
    }

    /// Remove a child node; it stays in the arena, detached
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check(parent)?;
        self.check(child)?;
        if self.parent(child) != parent {
            return Err(DomError::NotAChild(child, parent));
        }
        self.detach(child);
        Ok(child)
    }

    /// Remove a node from whatever parent it has
    pub fn remove(&mut self, node: NodeId) -> DomResult<NodeId> {
        self.check(node)?;
        self.detach(node);
        Ok(node)
    }

    /// Parent of `id` (NONE if detached)
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.parent)
    }

    /// Iterate children with their nodes
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Iterate ancestors, nearest first (excluding `id`)
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.parent(id);
        std::iter::from_fn(move || {
            if !current.is_valid() {
                return None;
            }
            let out = current;
            current = self.parent(current);
            Some(out)
        })
    }

    /// Pre-order descendants of `id` (excluding `id`)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(node);
            let before = stack.len();
            stack.extend(self.children(node).map(|(c, _)| c));
            stack[before..].reverse();
        }
        out
    }

    /// Check the node is attached to the document
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.get(id).is_some() && self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    /// Find first connected element with `id` attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(NodeId::ROOT).into_iter()
            .find(|&n| self.element(n).and_then(ElementData::id) == Some(id))
    }

    /// All connected elements with the given tag, in document order
    pub fn get_elements_by_tag_name(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(NodeId::ROOT).into_iter()
            .filter(|&n| self.element(n).is_some_and(|e| e.tag.eq_ignore_ascii_case(tag)))
            .collect()
    }

    /// All connected elements carrying `class`, in document order
    pub fn get_elements_by_class_name(&self, class: &str) -> Vec<NodeId> {
        self.descendants(NodeId::ROOT).into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    /// Nearest inclusive ancestor carrying `class`
    pub fn closest_with_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&n| self.has_class(n, class))
    }

    /// Check an element has a class
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.class_list.contains(class))
    }

    /// Get an attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id)?.get_attr(name)
    }

    /// Set an attribute
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.try_element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    /// Set an inline style property
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> DomResult<()> {
        self.try_element_mut(id)?.style.set_property(property, value);
        Ok(())
    }

    /// Read an inline style property
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id)?.style.get_property(property)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id).into_iter()
            .filter_map(|n| self.get(n).and_then(Node::as_text))
            .collect()
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, content: &str) -> DomResult<()> {
        self.check(id)?;
        if let Some(NodeData::Text(text)) = self.get_mut(id).map(|n| &mut n.data) {
            *text = content.to_string();
            return Ok(());
        }
        let children: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        // A lone text child is rewritten in place so refreshes don't grow the arena
        if let ([only], false) = (children.as_slice(), content.is_empty()) {
            if let Some(NodeData::Text(text)) = self.get_mut(*only).map(|n| &mut n.data) {
                *text = content.to_string();
                return Ok(());
            }
        }
        for child in children {
            self.detach(child);
        }
        if !content.is_empty() {
            let text = self.create_text(content);
            self.append_child(id, text)?;
        }
        Ok(())
    }

    /// Bounding box of an element in viewport coordinates
    pub fn bounding_client_rect(&self, id: NodeId) -> DOMRect {
        self.element(id)
            .map(|e| e.geometry.bounding_client_rect())
            .unwrap_or_default()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}
