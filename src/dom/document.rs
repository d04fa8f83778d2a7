//! Document - Arena-based DOM representation
//!
//! Efficient DOM storage with:
//! - Arena allocation for nodes
//! - NodeId indices for traversal
//! - String interning for names and text
//!
//! Documents are assembled with [`DocumentBuilder`] and are immutable
//! afterwards, which is what lets ranges be normalized from several
//! threads at once.

use super::node::{Node, NodeId, NodeKind};
use super::strings::StringPool;
use super::DocumentAccess;
use crate::error::{RangeError, RangeResult};

/// A document stored in arena format
#[derive(Debug)]
pub struct Document {
    /// Arena of nodes; index 0 is the document node
    nodes: Vec<Node>,
    /// Interned names and text
    pub strings: StringPool,
    /// Root element node ID (not document node)
    root_element: Option<NodeId>,
}

impl Document {
    fn new() -> Self {
        let mut nodes = Vec::with_capacity(256);
        nodes.push(Node::document());
        Document {
            nodes,
            strings: StringPool::new(),
            root_element: None,
        }
    }

    /// Get root element ID
    pub fn root_element_id(&self) -> Option<NodeId> {
        self.root_element
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// Get element name as string
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        if node.is_element() {
            self.strings.get_str(node.name_id)
        } else {
            None
        }
    }

    /// Get content of a text or comment node
    pub fn node_content(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        match node.kind {
            NodeKind::Text | NodeKind::Comment => self.strings.get_str(node.name_id),
            _ => None,
        }
    }

    /// Resolve a child-index path starting at the root element.
    /// An empty path names the root element itself.
    pub fn node_at_path(&self, path: &[u32]) -> Option<NodeId> {
        let mut current = self.root_element?;
        for &index in path {
            current = self.child_at(current, index)?;
        }
        Some(current)
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        let first = self.get_node(id).and_then(|n| n.first_child);
        ChildIter { doc: self, next: first }
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Link a child node to its parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        // Get parent's last_child first to avoid borrow issues
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        let parent = &mut self.nodes[parent_id as usize];
        parent.last_child = Some(child_id);
        parent.child_count += 1;
    }
}

/// Iterator over child nodes
pub struct ChildIter<'d> {
    doc: &'d Document,
    next: Option<NodeId>,
}

impl<'d> Iterator for ChildIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

// =============================================================================
// DocumentAccess trait implementation
// =============================================================================

impl DocumentAccess for Document {
    #[inline]
    fn contains(&self, id: NodeId) -> bool {
        (id as usize) < self.nodes.len()
    }

    #[inline]
    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id)?.parent
    }

    #[inline]
    fn first_child_of(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id)?.first_child
    }

    #[inline]
    fn last_child_of(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id)?.last_child
    }

    #[inline]
    fn prev_sibling_of(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id)?.prev_sibling
    }

    #[inline]
    fn next_sibling_of(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id)?.next_sibling
    }

    #[inline]
    fn is_text(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(Node::is_text)
    }

    #[inline]
    fn text_len(&self, id: NodeId) -> u32 {
        match self.get_node(id) {
            Some(node) if node.is_text() => node.text_len,
            _ => 0,
        }
    }

    fn text_content(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        if node.is_text() {
            self.strings.get_str(node.name_id)
        } else {
            None
        }
    }

    #[inline]
    fn child_count(&self, id: NodeId) -> u32 {
        self.get_node(id).map_or(0, |n| n.child_count)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Incremental document construction.
///
/// Nodes are appended in document order, so arena IDs follow pre-order.
/// Construction errors are recorded and reported by [`finish`](Self::finish).
#[derive(Debug)]
pub struct DocumentBuilder {
    doc: Document,
    /// Open elements, innermost last
    stack: Vec<NodeId>,
    /// Whether top-level nodes attach to the document node
    attached: bool,
    error: Option<RangeError>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        DocumentBuilder {
            doc: Document::new(),
            stack: Vec::new(),
            attached: true,
            error: None,
        }
    }

    /// Start an element and make it the current parent
    pub fn open(&mut self, name: &str) -> NodeId {
        let id = self.element(name);
        self.stack.push(id);
        id
    }

    /// Append an element with no children
    pub fn empty(&mut self, name: &str) -> NodeId {
        self.element(name)
    }

    /// Close the innermost open element
    pub fn close(&mut self) -> &mut Self {
        if self.stack.pop().is_none() {
            self.fail("close without matching open".to_string());
        }
        self
    }

    /// Append a text node
    pub fn text(&mut self, content: &str) -> NodeId {
        if self.stack.is_empty() && self.attached {
            self.fail("text not allowed at document level".to_string());
        }
        let content_id = self.doc.strings.intern(content);
        let len = content.chars().count() as u32;
        let (parent, depth) = self.position();
        self.push(Node::text(content_id, len, parent, depth))
    }

    /// Append a comment node
    pub fn comment(&mut self, content: &str) -> NodeId {
        let content_id = self.doc.strings.intern(content);
        let (parent, depth) = self.position();
        self.push(Node::comment(content_id, parent, depth))
    }

    /// Switch to building nodes that are not linked under the document.
    ///
    /// Top-level nodes appended after this call have no parent and no
    /// siblings. Open elements must be closed first.
    pub fn detached(&mut self) -> &mut Self {
        if !self.stack.is_empty() {
            self.fail("detached() called with open elements".to_string());
        }
        self.attached = false;
        self
    }

    pub fn finish(self) -> RangeResult<Document> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if let Some(&open) = self.stack.first() {
            let name = self.doc.node_name(open).unwrap_or("").to_string();
            return Err(RangeError::MalformedTree(format!("unclosed element: <{}>", name)));
        }
        Ok(self.doc)
    }

    fn element(&mut self, name: &str) -> NodeId {
        let top_level = self.stack.is_empty() && self.attached;
        if top_level && self.doc.root_element.is_some() {
            self.fail("document has multiple root elements".to_string());
        }
        let name_id = self.doc.strings.intern(name);
        let (parent, depth) = self.position();
        let id = self.push(Node::element(name_id, parent, depth));
        if top_level && self.doc.root_element.is_none() {
            self.doc.root_element = Some(id);
        }
        id
    }

    fn position(&self) -> (Option<NodeId>, u16) {
        match self.stack.last() {
            Some(&open) => (Some(open), self.doc.nodes[open as usize].depth + 1),
            None if self.attached => (Some(0), 1),
            None => (None, 0),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let parent = node.parent;
        let node_id = self.doc.nodes.len() as NodeId;
        self.doc.nodes.push(node);
        if let Some(parent_id) = parent {
            self.doc.link_child(parent_id, node_id);
        }
        node_id
    }

    fn fail(&mut self, message: String) {
        if self.error.is_none() {
            self.error = Some(RangeError::MalformedTree(message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // <root>hello<b>bold</b><br/></root>
    fn sample() -> Document {
        let mut b = DocumentBuilder::new();
        b.open("root");
        b.text("hello");
        b.open("b");
        b.text("bold");
        b.close();
        b.empty("br");
        b.close();
        b.finish().unwrap()
    }

    #[test]
    fn test_build_simple() {
        let doc = sample();
        let root = doc.root_element_id().unwrap();
        assert_eq!(doc.node_name(root), Some("root"));
        assert_eq!(doc.child_count(root), 3);
        assert_eq!(doc.node_count(), 6);
    }

    #[test]
    fn test_ids_follow_document_order() {
        let doc = sample();
        let ids: Vec<_> = [&[0][..], &[1], &[1, 0], &[2]]
            .iter()
            .filter_map(|path| doc.node_at_path(path))
            .collect();
        assert_eq!(ids, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_siblings() {
        let doc = sample();
        let root = doc.root_element_id().unwrap();
        let children: Vec<_> = doc.children(root).collect();
        assert_eq!(children.len(), 3);

        let first = doc.get_node(children[0]).unwrap();
        assert!(first.prev_sibling.is_none());
        assert_eq!(first.next_sibling, Some(children[1]));
        assert_eq!(doc.index_in_parent(children[2]), Some(2));
        assert_eq!(doc.index_in_parent(0), None);
    }

    #[test]
    fn test_text_metadata() {
        let doc = sample();
        let hello = doc.node_at_path(&[0]).unwrap();
        assert!(doc.is_text(hello));
        assert_eq!(doc.text_len(hello), 5);
        assert_eq!(doc.text_content(hello), Some("hello"));

        let br = doc.node_at_path(&[2]).unwrap();
        assert!(!doc.is_text(br));
        assert_eq!(doc.content_len(br), 0);
    }

    #[test]
    fn test_text_len_counts_chars() {
        let mut b = DocumentBuilder::new();
        b.open("p");
        let t = b.text("naïve");
        b.close();
        let doc = b.finish().unwrap();
        assert_eq!(doc.text_len(t), 5);
    }

    #[test]
    fn test_node_at_path() {
        let doc = sample();
        assert_eq!(doc.node_at_path(&[]), doc.root_element_id());
        assert_eq!(doc.node_at_path(&[1, 0]), Some(4));
        assert_eq!(doc.node_at_path(&[1, 1]), None);
        assert_eq!(doc.node_at_path(&[7]), None);
    }

    #[test]
    fn test_unclosed_element() {
        let mut b = DocumentBuilder::new();
        b.open("root");
        b.open("p");
        b.close();
        let err = b.finish().unwrap_err();
        assert_eq!(err, RangeError::MalformedTree("unclosed element: <root>".to_string()));
    }

    #[test]
    fn test_multiple_roots() {
        let mut b = DocumentBuilder::new();
        b.empty("a");
        b.empty("b");
        assert!(matches!(b.finish(), Err(RangeError::MalformedTree(_))));
    }

    #[test]
    fn test_unbalanced_close() {
        let mut b = DocumentBuilder::new();
        b.empty("a");
        b.close();
        assert!(b.finish().is_err());
    }

    #[test]
    fn test_text_at_document_level() {
        let mut b = DocumentBuilder::new();
        b.text("stray");
        assert!(b.finish().is_err());
    }

    #[test]
    fn test_detached_fragment() {
        let mut b = DocumentBuilder::new();
        b.open("root");
        b.text("x");
        b.close();
        b.detached();
        let frag = b.open("frag");
        let t = b.text("y");
        b.close();
        let doc = b.finish().unwrap();

        assert_eq!(doc.parent_of(frag), None);
        assert_eq!(doc.parent_of(t), Some(frag));
        assert_eq!(doc.child_count(0), 1);
        assert_eq!(doc.root_element_id(), Some(1));
    }
}
