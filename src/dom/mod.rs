//! DOM Module - Arena-based document tree
//!
//! Implements the document tree ranges are positioned over:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for cache-friendly traversal
//! - String interning for element names and text content
//!
//! Range code never touches the arena directly; it navigates through
//! [`DocumentAccess`], so any tree exposing these links can be normalized.

pub mod document;
pub mod node;
pub mod strings;

pub use document::{Document, DocumentBuilder};
pub use node::{NodeId, NodeKind};

/// Navigation contract for trees that ranges are positioned over.
///
/// Implementors provide parent/child/sibling links and text metadata; the
/// derived queries (child counts, indexed access, sibling position) have
/// default implementations in terms of those links.
pub trait DocumentAccess {
    /// Whether `id` names a node of this tree
    fn contains(&self, id: NodeId) -> bool;

    fn parent_of(&self, id: NodeId) -> Option<NodeId>;

    fn first_child_of(&self, id: NodeId) -> Option<NodeId>;

    fn last_child_of(&self, id: NodeId) -> Option<NodeId>;

    fn prev_sibling_of(&self, id: NodeId) -> Option<NodeId>;

    fn next_sibling_of(&self, id: NodeId) -> Option<NodeId>;

    /// Whether the node is a text leaf (offsets into it are char offsets)
    fn is_text(&self, id: NodeId) -> bool;

    /// Length of a text leaf in chars, 0 for any other node
    fn text_len(&self, id: NodeId) -> u32;

    /// Text of a text leaf
    fn text_content(&self, id: NodeId) -> Option<&str>;

    #[inline]
    fn has_children(&self, id: NodeId) -> bool {
        self.first_child_of(id).is_some()
    }

    /// Number of children
    fn child_count(&self, id: NodeId) -> u32 {
        let mut count = 0;
        let mut child = self.first_child_of(id);
        while let Some(cid) = child {
            count += 1;
            child = self.next_sibling_of(cid);
        }
        count
    }

    /// Child at `index`, if any
    fn child_at(&self, id: NodeId, index: u32) -> Option<NodeId> {
        let mut child = self.first_child_of(id);
        for _ in 0..index {
            child = self.next_sibling_of(child?);
        }
        child
    }

    /// Position of the node among its parent's children
    fn index_in_parent(&self, id: NodeId) -> Option<u32> {
        self.parent_of(id)?;
        let mut index = 0;
        let mut sibling = self.prev_sibling_of(id);
        while let Some(sid) = sibling {
            index += 1;
            sibling = self.prev_sibling_of(sid);
        }
        Some(index)
    }

    /// Largest valid offset for a boundary inside this node: the text
    /// length for text leaves, the child count otherwise.
    fn content_len(&self, id: NodeId) -> u32 {
        if self.is_text(id) {
            self.text_len(id)
        } else {
            self.child_count(id)
        }
    }
}
