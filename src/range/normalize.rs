//! Range boundary normalization
//!
//! Rewrites both boundaries of a range so each rests on the leaf nearest the
//! position it denotes. Three placements are ambiguous and get resolved:
//!
//! - a start at the trailing edge of a text leaf (or an end at its leading
//!   edge) covers nothing of that leaf, so the boundary moves to the next
//!   (previous) leaf in document order;
//! - a boundary between two children of an element is anchored on the
//!   deepest leaf of the child before it (start) or after it (end);
//! - a leaf that the range does not cover is skipped by stepping in document
//!   order until a covered leaf is found or the two searches meet.
//!
//! Normalization is best-effort: when a search runs off the tree, the
//! boundary keeps its original placement.

use tracing::{debug, instrument, trace};

use super::traverse::{document_forward, document_reverse, first_leaf, last_leaf};
use super::{Boundary, BoundaryRange};
use crate::dom::{DocumentAccess, NodeId};

/// Where a normalized boundary ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    At(Boundary),
    Before(NodeId),
    After(NodeId),
}

impl Placement {
    fn resolve<D: DocumentAccess + ?Sized>(self, doc: &D) -> Option<Boundary> {
        match self {
            Placement::At(b) => Some(b),
            Placement::Before(node) => Boundary::before(doc, node),
            Placement::After(node) => Boundary::after(doc, node),
        }
    }
}

/// Normalize `range` in place over `doc` and return it.
///
/// Only boundaries whose normalized placement differs from the current one
/// are written back.
#[instrument(level = "debug", skip_all, fields(start = ?range.start(), end = ?range.end()))]
pub fn normalize<'r, D, R>(doc: &D, range: &'r mut R) -> &'r mut R
where
    D: DocumentAccess + ?Sized,
    R: BoundaryRange,
{
    let start = range.start();
    let end = range.end();

    if !doc.contains(start.container) || !doc.contains(end.container) {
        debug!("boundary references unknown node, leaving range as is");
        return range;
    }

    let start_anchor = anchor_start(doc, start);
    let end_anchor = anchor_end(doc, end);

    let start_seed = start_anchor.map(|a| first_leaf(doc, a.container));
    let end_seed = end_anchor.map(|a| last_leaf(doc, a.container));

    let start_leaf = match (start_anchor, start_seed) {
        (Some(anchor), Some(seed)) => seek_forward(doc, anchor, seed, end_seed),
        _ => None,
    };
    let end_leaf = match (end_anchor, end_seed) {
        (Some(anchor), Some(seed)) => seek_reverse(doc, anchor, seed, start_leaf),
        _ => None,
    };

    let start_place = start_anchor
        .zip(start_leaf)
        .map(|(anchor, leaf)| place_start(doc, anchor, leaf));
    let end_place = end_anchor
        .zip(end_leaf)
        .map(|(anchor, leaf)| place_end(doc, anchor, leaf));

    apply_start(doc, range, start, start_place);
    apply_end(doc, range, end, end_place);
    range
}

/// Resolve a start between two children to the trailing edge of the
/// preceding child's deepest last leaf. Other starts are returned as is.
/// `None` when the child index does not exist.
pub fn anchor_start<D: DocumentAccess + ?Sized>(doc: &D, start: Boundary) -> Option<Boundary> {
    if !doc.has_children(start.container) || start.offset == 0 {
        return Some(start);
    }
    let Some(child) = doc.child_at(start.container, start.offset - 1) else {
        debug!(?start, "start offset past last child");
        return None;
    };
    let leaf = last_leaf(doc, child);
    let anchored = Boundary::new(leaf, doc.content_len(leaf));
    trace!(?start, ?anchored, "start anchored after preceding child");
    Some(anchored)
}

/// Resolve an end between two children to the leading edge of the following
/// child's deepest first leaf. Other ends are returned as is.
pub fn anchor_end<D: DocumentAccess + ?Sized>(doc: &D, end: Boundary) -> Option<Boundary> {
    if end.offset >= doc.child_count(end.container) {
        return Some(end);
    }
    let child = doc.child_at(end.container, end.offset)?;
    let anchored = Boundary::new(first_leaf(doc, child), 0);
    trace!(?end, ?anchored, "end anchored before following child");
    Some(anchored)
}

/// Zero-length text never holds range content
#[inline]
fn is_empty_text<D: DocumentAccess + ?Sized>(doc: &D, node: NodeId) -> bool {
    doc.is_text(node) && doc.text_len(node) == 0
}

/// Whether a start anchored at `anchor` covers any of `candidate`
fn start_covers<D: DocumentAccess + ?Sized>(doc: &D, anchor: Boundary, candidate: NodeId) -> bool {
    if doc.has_children(candidate) || is_empty_text(doc, candidate) {
        return false;
    }
    !(candidate == anchor.container && anchor.offset == doc.content_len(candidate))
}

/// Whether an end anchored at `anchor` covers any of `candidate`
fn end_covers<D: DocumentAccess + ?Sized>(doc: &D, anchor: Boundary, candidate: NodeId) -> bool {
    if doc.has_children(candidate) || is_empty_text(doc, candidate) {
        return false;
    }
    !(candidate == anchor.container && anchor.offset == 0)
}

/// Step forward from `seed` to the first covered leaf, stopping early at
/// `stop` (the end's candidate). `None` if the walk leaves the tree.
fn seek_forward<D: DocumentAccess + ?Sized>(
    doc: &D,
    anchor: Boundary,
    seed: NodeId,
    stop: Option<NodeId>,
) -> Option<NodeId> {
    let mut candidate = seed;
    while !start_covers(doc, anchor, candidate) && Some(candidate) != stop {
        trace!(candidate, "start skips uncovered node");
        match document_forward(doc, candidate) {
            Some(next) => candidate = next,
            None => {
                debug!(?anchor, "forward search ran off the tree");
                return None;
            }
        }
    }
    Some(candidate)
}

/// Mirror of [`seek_forward`] for the end boundary, stopping early at the
/// start's final candidate.
fn seek_reverse<D: DocumentAccess + ?Sized>(
    doc: &D,
    anchor: Boundary,
    seed: NodeId,
    stop: Option<NodeId>,
) -> Option<NodeId> {
    let mut candidate = seed;
    while !end_covers(doc, anchor, candidate) && Some(candidate) != stop {
        trace!(candidate, "end skips uncovered node");
        match document_reverse(doc, candidate) {
            Some(prev) => candidate = prev,
            None => {
                debug!(?anchor, "reverse search ran off the tree");
                return None;
            }
        }
    }
    Some(candidate)
}

fn place_start<D: DocumentAccess + ?Sized>(doc: &D, anchor: Boundary, leaf: NodeId) -> Placement {
    if leaf == anchor.container {
        Placement::At(anchor)
    } else if doc.is_text(leaf) {
        Placement::At(Boundary::new(leaf, 0))
    } else {
        Placement::Before(leaf)
    }
}

fn place_end<D: DocumentAccess + ?Sized>(doc: &D, anchor: Boundary, leaf: NodeId) -> Placement {
    if leaf == anchor.container {
        Placement::At(anchor)
    } else if doc.is_text(leaf) {
        Placement::At(Boundary::new(leaf, doc.text_len(leaf)))
    } else {
        Placement::After(leaf)
    }
}

fn apply_start<D, R>(doc: &D, range: &mut R, original: Boundary, place: Option<Placement>)
where
    D: DocumentAccess + ?Sized,
    R: BoundaryRange,
{
    let Some(place) = place else {
        debug!(?original, "start kept: no leaf found");
        return;
    };
    let Some(target) = place.resolve(doc) else {
        debug!(?original, ?place, "start kept: leaf has no parent");
        return;
    };
    if target == original {
        return;
    }
    debug!(?original, ?target, "start moved");
    match place {
        Placement::Before(node) => {
            range.set_start_before(doc, node);
        }
        _ => range.set_start(target.container, target.offset),
    }
}

fn apply_end<D, R>(doc: &D, range: &mut R, original: Boundary, place: Option<Placement>)
where
    D: DocumentAccess + ?Sized,
    R: BoundaryRange,
{
    let Some(place) = place else {
        debug!(?original, "end kept: no leaf found");
        return;
    };
    let Some(target) = place.resolve(doc) else {
        debug!(?original, ?place, "end kept: leaf has no parent");
        return;
    };
    if target == original {
        return;
    }
    debug!(?original, ?target, "end moved");
    match place {
        Placement::After(node) => {
            range.set_end_after(doc, node);
        }
        _ => range.set_end(target.container, target.offset),
    }
}
