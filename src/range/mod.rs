//! Range Module - boundary pairs over a document tree
//!
//! - `traverse`: leaf descent and document-order stepping
//! - `normalize`: canonical leaf placement of both boundaries
//! - `order`: boundary point comparison in document order
//! - `text`: text content covered by a range

pub mod normalize;
pub mod order;
pub mod text;
pub mod traverse;

pub use normalize::normalize;
pub use order::compare_points;
pub use text::range_text;

use crate::dom::{DocumentAccess, NodeId};
use crate::error::{RangeError, RangeResult};

/// A position in the tree: a child index inside an element container, or a
/// char offset inside a text leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Boundary {
    pub container: NodeId,
    pub offset: u32,
}

impl Boundary {
    pub const fn new(container: NodeId, offset: u32) -> Self {
        Boundary { container, offset }
    }

    /// The position immediately before `node`, i.e. `(parent, index)`
    pub fn before<D: DocumentAccess + ?Sized>(doc: &D, node: NodeId) -> Option<Self> {
        let parent = doc.parent_of(node)?;
        let index = doc.index_in_parent(node)?;
        Some(Boundary::new(parent, index))
    }

    /// The position immediately after `node`, i.e. `(parent, index + 1)`
    pub fn after<D: DocumentAccess + ?Sized>(doc: &D, node: NodeId) -> Option<Self> {
        let parent = doc.parent_of(node)?;
        let index = doc.index_in_parent(node)?;
        Some(Boundary::new(parent, index + 1))
    }

    /// Check that the container exists and the offset is within its content
    pub fn validate<D: DocumentAccess + ?Sized>(&self, doc: &D) -> RangeResult<()> {
        if !doc.contains(self.container) {
            return Err(RangeError::UnknownNode(self.container));
        }
        let max = doc.content_len(self.container);
        if self.offset > max {
            return Err(RangeError::InvalidBoundary {
                node: self.container,
                offset: self.offset,
                max,
            });
        }
        Ok(())
    }
}

/// Mutable access to a range's two boundaries.
///
/// `normalize` works against this trait so callers can hand it their own
/// range type; [`Range`] is the plain value implementation.
pub trait BoundaryRange {
    fn start(&self) -> Boundary;

    fn end(&self) -> Boundary;

    fn set_start(&mut self, container: NodeId, offset: u32);

    fn set_end(&mut self, container: NodeId, offset: u32);

    /// Place the start immediately before `node`. Returns false, leaving the
    /// range untouched, when `node` has no parent.
    fn set_start_before<D: DocumentAccess + ?Sized>(&mut self, doc: &D, node: NodeId) -> bool {
        match Boundary::before(doc, node) {
            Some(b) => {
                self.set_start(b.container, b.offset);
                true
            }
            None => false,
        }
    }

    /// Place the end immediately after `node`. Returns false, leaving the
    /// range untouched, when `node` has no parent.
    fn set_end_after<D: DocumentAccess + ?Sized>(&mut self, doc: &D, node: NodeId) -> bool {
        match Boundary::after(doc, node) {
            Some(b) => {
                self.set_end(b.container, b.offset);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Boundary,
    pub end: Boundary,
}

impl Range {
    pub const fn new(start: Boundary, end: Boundary) -> Self {
        Range { start, end }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Validate both boundaries against `doc`
    pub fn validate<D: DocumentAccess + ?Sized>(&self, doc: &D) -> RangeResult<()> {
        self.start.validate(doc)?;
        self.end.validate(doc)
    }
}

impl BoundaryRange for Range {
    #[inline]
    fn start(&self) -> Boundary {
        self.start
    }

    #[inline]
    fn end(&self) -> Boundary {
        self.end
    }

    fn set_start(&mut self, container: NodeId, offset: u32) {
        self.start = Boundary::new(container, offset);
    }

    fn set_end(&mut self, container: NodeId, offset: u32) {
        self.end = Boundary::new(container, offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DocumentBuilder;

    #[test]
    fn test_before_after() {
        let mut b = DocumentBuilder::new();
        let p = b.open("p");
        b.text("ab");
        let img = b.empty("img");
        b.close();
        let doc = b.finish().unwrap();

        assert_eq!(Boundary::before(&doc, img), Some(Boundary::new(p, 1)));
        assert_eq!(Boundary::after(&doc, img), Some(Boundary::new(p, 2)));
        assert_eq!(Boundary::before(&doc, 0), None);
    }

    #[test]
    fn test_validate() {
        let mut b = DocumentBuilder::new();
        let p = b.open("p");
        let t = b.text("abc");
        b.close();
        let doc = b.finish().unwrap();

        assert!(Boundary::new(t, 3).validate(&doc).is_ok());
        assert!(Boundary::new(p, 1).validate(&doc).is_ok());
        assert_eq!(
            Boundary::new(t, 4).validate(&doc),
            Err(RangeError::InvalidBoundary { node: t, offset: 4, max: 3 })
        );
        assert_eq!(Boundary::new(40, 0).validate(&doc), Err(RangeError::UnknownNode(40)));
    }

    #[test]
    fn test_range_mutators() {
        let mut b = DocumentBuilder::new();
        let p = b.open("p");
        let t = b.text("abc");
        b.close();
        let doc = b.finish().unwrap();

        let mut range = Range::new(Boundary::new(t, 1), Boundary::new(t, 1));
        assert!(range.is_collapsed());

        assert!(range.set_start_before(&doc, t));
        assert!(range.set_end_after(&doc, t));
        assert_eq!(range, Range::new(Boundary::new(p, 0), Boundary::new(p, 1)));

        assert!(!range.set_start_before(&doc, 0));
        assert_eq!(range.start(), Boundary::new(p, 0));
    }
}
