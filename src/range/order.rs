//! Boundary point ordering
//!
//! Compares two boundaries by document position: equal containers compare
//! by offset; when one container encloses the other, the enclosed
//! boundary's child index is weighed against the outer offset; otherwise
//! the containers' branches under their common ancestor decide.

use std::cmp::Ordering;

use super::Boundary;
use crate::dom::{DocumentAccess, NodeId};

/// Ancestor-or-self chain of `node`, root first
fn ancestry<D: DocumentAccess + ?Sized>(doc: &D, node: NodeId) -> Vec<NodeId> {
    let mut chain = vec![node];
    let mut current = node;
    while let Some(parent) = doc.parent_of(current) {
        chain.push(parent);
        current = parent;
    }
    chain.reverse();
    chain
}

/// Order of `a` relative to `b`, or `None` when they are in different trees
pub fn compare_points<D: DocumentAccess + ?Sized>(
    doc: &D,
    a: Boundary,
    b: Boundary,
) -> Option<Ordering> {
    if a.container == b.container {
        return Some(a.offset.cmp(&b.offset));
    }

    let chain_a = ancestry(doc, a.container);
    let chain_b = ancestry(doc, b.container);
    if chain_a[0] != chain_b[0] {
        return None;
    }

    // Length of the shared prefix; the last shared node is the common ancestor
    let shared = chain_a
        .iter()
        .zip(&chain_b)
        .take_while(|(x, y)| x == y)
        .count();

    if shared == chain_a.len() {
        // a.container encloses b.container
        let child = chain_b[shared];
        let index = doc.index_in_parent(child)?;
        return Some(if index < a.offset {
            Ordering::Greater
        } else {
            Ordering::Less
        });
    }

    if shared == chain_b.len() {
        let child = chain_a[shared];
        let index = doc.index_in_parent(child)?;
        return Some(if index < b.offset {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }

    let index_a = doc.index_in_parent(chain_a[shared])?;
    let index_b = doc.index_in_parent(chain_b[shared])?;
    Some(index_a.cmp(&index_b))
}
