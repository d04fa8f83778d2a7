//! Document node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references.

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Type of document node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element node
    Element,
    /// Text content
    Text,
    /// Comment
    Comment,
}

/// A node in the document arena
#[derive(Debug, Clone)]
pub struct Node {
    /// Type of this node
    pub kind: NodeKind,
    /// Parent node (None for the document node and detached fragments)
    pub parent: Option<NodeId>,
    /// First child node
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Number of linked children
    pub child_count: u32,
    /// Index into string pool for name (elements) or content (text, comments)
    pub name_id: u32,
    /// Text length in chars (text nodes only)
    pub text_len: u32,
    /// Depth in document tree
    pub depth: u16,
}

impl Node {
    fn with_kind(kind: NodeKind, parent: Option<NodeId>, depth: u16) -> Self {
        Node {
            kind,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            child_count: 0,
            name_id: 0,
            text_len: 0,
            depth,
        }
    }

    /// Create a new document root node
    pub fn document() -> Self {
        Self::with_kind(NodeKind::Document, None, 0)
    }

    /// Create a new element node
    pub fn element(name_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        let mut node = Self::with_kind(NodeKind::Element, parent, depth);
        node.name_id = name_id;
        node
    }

    /// Create a new text node
    pub fn text(content_id: u32, text_len: u32, parent: Option<NodeId>, depth: u16) -> Self {
        let mut node = Self::with_kind(NodeKind::Text, parent, depth);
        node.name_id = content_id;
        node.text_len = text_len;
        node
    }

    /// Create a new comment node
    pub fn comment(content_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        let mut node = Self::with_kind(NodeKind::Comment, parent, depth);
        node.name_id = content_id;
        node
    }

    /// Check if this is an element node
    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Check if this is a text node
    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let doc = Node::document();
        assert_eq!(doc.kind, NodeKind::Document);
        assert!(doc.parent.is_none());
        assert_eq!(doc.depth, 0);
    }

    #[test]
    fn test_element_node() {
        let elem = Node::element(1, Some(0), 1);
        assert_eq!(elem.kind, NodeKind::Element);
        assert_eq!(elem.parent, Some(0));
        assert_eq!(elem.name_id, 1);
        assert_eq!(elem.depth, 1);
        assert!(elem.first_child.is_none());
    }

    #[test]
    fn test_text_node() {
        let text = Node::text(2, 5, Some(1), 2);
        assert!(text.is_text());
        assert!(!text.is_element());
        assert_eq!(text.text_len, 5);
        assert_eq!(text.name_id, 2);
    }
}
