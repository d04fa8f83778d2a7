//! Leaf descent and document-order stepping
//!
//! Pure navigation over [`DocumentAccess`]; no allocation, no shared state.

use crate::dom::{DocumentAccess, NodeId};

/// Follow first-child links down to a childless node (possibly `node` itself)
pub fn first_leaf<D: DocumentAccess + ?Sized>(doc: &D, node: NodeId) -> NodeId {
    let mut current = node;
    while let Some(child) = doc.first_child_of(current) {
        current = child;
    }
    current
}

/// Follow last-child links down to a childless node (possibly `node` itself)
pub fn last_leaf<D: DocumentAccess + ?Sized>(doc: &D, node: NodeId) -> NodeId {
    let mut current = node;
    while let Some(child) = doc.last_child_of(current) {
        current = child;
    }
    current
}

/// Pre-order successor: first child, else the next sibling of the nearest
/// ancestor-or-self that has one. `None` once the walk passes the root.
pub fn document_forward<D: DocumentAccess + ?Sized>(doc: &D, node: NodeId) -> Option<NodeId> {
    if let Some(child) = doc.first_child_of(node) {
        return Some(child);
    }
    let mut current = node;
    loop {
        if let Some(sibling) = doc.next_sibling_of(current) {
            return Some(sibling);
        }
        current = doc.parent_of(current)?;
    }
}

/// Mirror of [`document_forward`]: last child, else the previous sibling of
/// the nearest ancestor-or-self that has one.
pub fn document_reverse<D: DocumentAccess + ?Sized>(doc: &D, node: NodeId) -> Option<NodeId> {
    if let Some(child) = doc.last_child_of(node) {
        return Some(child);
    }
    let mut current = node;
    loop {
        if let Some(sibling) = doc.prev_sibling_of(current) {
            return Some(sibling);
        }
        current = doc.parent_of(current)?;
    }
}

/// Topmost ancestor-or-self of `node`
pub fn tree_root<D: DocumentAccess + ?Sized>(doc: &D, node: NodeId) -> NodeId {
    let mut current = node;
    while let Some(parent) = doc.parent_of(current) {
        current = parent;
    }
    current
}
