//! Text covered by a range
//!
//! Concatenates the selected part of every text leaf between the two
//! boundaries, in document order. Comments and element names contribute
//! nothing.

use std::cmp::Ordering;

use super::order::compare_points;
use super::traverse::{document_forward, tree_root};
use super::{Boundary, Range};
use crate::dom::{DocumentAccess, NodeId};

/// Chars `from..to` of a text leaf
fn slice_chars(text: &str, from: u32, to: u32) -> &str {
    if from >= to {
        return "";
    }
    let mut indices = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len()));
    let begin = indices.nth(from as usize).unwrap_or(text.len());
    let end = indices
        .nth((to - from - 1) as usize)
        .unwrap_or(text.len());
    &text[begin..end]
}

pub fn range_text<D: DocumentAccess + ?Sized>(doc: &D, range: &Range) -> String {
    let Range { start, end } = *range;
    if !doc.contains(start.container) || !doc.contains(end.container) {
        return String::new();
    }

    if start.container == end.container && doc.is_text(start.container) {
        return doc
            .text_content(start.container)
            .map(|text| slice_chars(text, start.offset, end.offset).to_string())
            .unwrap_or_default();
    }

    if range.is_collapsed() || compare_points(doc, start, end) != Some(Ordering::Less) {
        return String::new();
    }

    let mut out = String::new();
    let mut node: Option<NodeId> = Some(tree_root(doc, start.container));
    while let Some(id) = node {
        node = document_forward(doc, id);
        let Some(text) = doc.text_content(id) else {
            continue;
        };
        let len = doc.text_len(id);

        let from = if id == start.container {
            start.offset
        } else if compare_points(doc, Boundary::new(id, len), start) != Some(Ordering::Greater) {
            continue;
        } else {
            0
        };

        let to = if id == end.container {
            end.offset
        } else if compare_points(doc, Boundary::new(id, 0), end) != Some(Ordering::Less) {
            break;
        } else {
            len
        };

        out.push_str(slice_chars(text, from, to));
        if id == end.container {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, DocumentBuilder};

    // 0 #document
    // 1 <p>
    // 2   "héllo "
    // 3   <b>
    // 4     "big"
    // 5   <!--note-->
    // 6   " world"
    fn sample() -> Document {
        let mut b = DocumentBuilder::new();
        b.open("p");
        b.text("héllo ");
        b.open("b");
        b.text("big");
        b.close();
        b.comment("note");
        b.text(" world");
        b.close();
        b.finish().unwrap()
    }

    fn r(sc: NodeId, so: u32, ec: NodeId, eo: u32) -> Range {
        Range::new(Boundary::new(sc, so), Boundary::new(ec, eo))
    }

    #[test]
    fn test_slice_chars() {
        assert_eq!(slice_chars("héllo", 1, 3), "él");
        assert_eq!(slice_chars("héllo", 0, 5), "héllo");
        assert_eq!(slice_chars("héllo", 3, 3), "");
        assert_eq!(slice_chars("héllo", 4, 2), "");
    }

    #[test]
    fn test_within_one_leaf() {
        let doc = sample();
        assert_eq!(range_text(&doc, &r(2, 1, 2, 4)), "éll");
    }

    #[test]
    fn test_across_leaves() {
        let doc = sample();
        assert_eq!(range_text(&doc, &r(2, 3, 6, 2)), "lo big w");
    }

    #[test]
    fn test_element_boundaries() {
        let doc = sample();
        assert_eq!(range_text(&doc, &r(1, 0, 1, 4)), "héllo big world");
        assert_eq!(range_text(&doc, &r(1, 1, 1, 2)), "big");
        assert_eq!(range_text(&doc, &r(1, 2, 1, 3)), "");
    }

    #[test]
    fn test_same_element_container() {
        let doc = sample();
        // <b> holds one text child; (b, 0)..(b, 1) covers all of it
        assert_eq!(range_text(&doc, &r(3, 0, 3, 1)), "big");
        assert_eq!(range_text(&doc, &r(1, 0, 1, 1)), "héllo ");
        assert_eq!(range_text(&doc, &r(1, 3, 1, 3)), "");
    }

    #[test]
    fn test_collapsed_and_reversed() {
        let doc = sample();
        assert_eq!(range_text(&doc, &r(4, 1, 4, 1)), "");
        assert_eq!(range_text(&doc, &r(6, 2, 2, 1)), "");
    }

    #[test]
    fn test_unknown_container() {
        let doc = sample();
        assert_eq!(range_text(&doc, &r(2, 0, 50, 0)), "");
    }
}
