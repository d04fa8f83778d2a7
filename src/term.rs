//! Elixir Term Conversion Utilities
//!
//! Decodes tree terms into documents and converts nodes and boundaries
//! back to Elixir terms.
//!
//! Tree terms:
//! - `{:element, name, attrs, children}`
//! - binary (text)
//! - `{:comment, text}`
//!
//! A document is a single root element, or a list `[root | fragments]`
//! whose fragments are built detached from the document node.

use rustler::types::tuple::get_tuple;
use rustler::{Atom, Encoder, Env, ListIterator, NewBinary, Term};

use crate::dom::{Document, DocumentAccess, DocumentBuilder, NodeId, NodeKind};
use crate::error::{RangeError, RangeResult};
use crate::range::{Boundary, Range};

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    element,
    comment,
}

/// Nesting limit for decoded trees; decoding recurses once per level
pub const MAX_DEPTH: usize = 1024;

/// `{container, offset}`
pub type BoundaryTerm = (NodeId, u32);

/// `{{start_id, start_off}, {end_id, end_off}}`
pub type RangeTerm = (BoundaryTerm, BoundaryTerm);

// =============================================================================
// Tree decoding
// =============================================================================

/// Build a document from a root element term or a `[root | fragments]` list
pub fn decode_tree(term: Term) -> RangeResult<Document> {
    let mut builder = DocumentBuilder::new();
    if term.is_list() {
        let mut parts: ListIterator = term
            .decode()
            .map_err(|_| malformed("expected a proper list of trees"))?;
        let root = parts.next().ok_or_else(|| malformed("empty tree list"))?;
        append_node(&mut builder, root, 0)?;
        builder.detached();
        for fragment in parts {
            append_node(&mut builder, fragment, 0)?;
        }
    } else {
        append_node(&mut builder, term, 0)?;
    }
    builder.finish()
}

fn malformed(message: impl Into<String>) -> RangeError {
    RangeError::MalformedTree(message.into())
}

fn append_node(builder: &mut DocumentBuilder, term: Term, depth: usize) -> RangeResult<()> {
    if depth > MAX_DEPTH {
        return Err(malformed(format!("nesting deeper than {} levels", MAX_DEPTH)));
    }

    if term.is_binary() {
        let text: &str = term.decode().map_err(|_| malformed("text is not valid UTF-8"))?;
        builder.text(text);
        return Ok(());
    }

    let elems = get_tuple(term).map_err(|_| malformed("expected element, comment or binary"))?;
    let tag: Atom = elems
        .first()
        .and_then(|t| t.decode().ok())
        .ok_or_else(|| malformed("tuple must start with a tag atom"))?;

    match elems.as_slice() {
        [_, name, _attrs, children] if tag == element() => {
            let name: &str = name.decode().map_err(|_| malformed("element name must be a binary"))?;
            let children: Vec<Term> = children
                .decode()
                .map_err(|_| malformed("element children must be a list"))?;
            if children.is_empty() {
                builder.empty(name);
                return Ok(());
            }
            builder.open(name);
            for child in children {
                append_node(builder, child, depth + 1)?;
            }
            builder.close();
            Ok(())
        }
        [_, content] if tag == comment() => {
            let content: &str = content
                .decode()
                .map_err(|_| malformed("comment text must be a binary"))?;
            builder.comment(content);
            Ok(())
        }
        _ => Err(malformed("unknown tree node")),
    }
}

// =============================================================================
// Node encoding
// =============================================================================

/// Convert a node to the tree term shape it was built from.
/// Element attributes are not retained, so `attrs` is always `[]`.
pub fn node_to_term<'a>(env: Env<'a>, doc: &Document, node_id: NodeId) -> Term<'a> {
    let node = match doc.get_node(node_id) {
        Some(n) => n,
        None => return rustler::types::atom::nil().encode(env),
    };

    match node.kind {
        NodeKind::Element => {
            let name = doc.node_name(node_id).unwrap_or("");
            let attrs: Vec<Term<'a>> = Vec::new();
            let children: Vec<Term<'a>> = doc
                .children(node_id)
                .map(|cid| node_to_term(env, doc, cid))
                .collect();

            (element(), str_to_binary(env, name), attrs, children).encode(env)
        }
        NodeKind::Text => str_to_binary(env, doc.node_content(node_id).unwrap_or("")),
        NodeKind::Comment => {
            let content = doc.node_content(node_id).unwrap_or("");
            (comment(), str_to_binary(env, content)).encode(env)
        }
        NodeKind::Document => match doc.root_element_id() {
            Some(root_id) => node_to_term(env, doc, root_id),
            None => rustler::types::atom::nil().encode(env),
        },
    }
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}

// =============================================================================
// Boundaries
// =============================================================================

/// Decode a boundary tuple and check it against `doc`
pub fn boundary_from_term<D: DocumentAccess + ?Sized>(
    doc: &D,
    (container, offset): BoundaryTerm,
) -> RangeResult<Boundary> {
    let boundary = Boundary::new(container, offset);
    boundary.validate(doc)?;
    Ok(boundary)
}

/// Decode a range tuple and check both boundaries against `doc`
pub fn range_from_term<D: DocumentAccess + ?Sized>(
    doc: &D,
    ((start_id, start_off), (end_id, end_off)): RangeTerm,
) -> RangeResult<Range> {
    let range = Range::new(
        Boundary::new(start_id, start_off),
        Boundary::new(end_id, end_off),
    );
    range.validate(doc)?;
    Ok(range)
}

pub fn range_to_term(range: &Range) -> RangeTerm {
    (
        (range.start.container, range.start.offset),
        (range.end.container, range.end.offset),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut b = DocumentBuilder::new();
        b.open("p");
        b.text("abc");
        b.empty("br");
        b.close();
        b.finish().unwrap()
    }

    #[test]
    fn test_range_from_term() {
        let doc = sample();
        let range = range_from_term(&doc, ((2, 1), (1, 2))).unwrap();
        assert_eq!(range, Range::new(Boundary::new(2, 1), Boundary::new(1, 2)));
        assert_eq!(range_to_term(&range), ((2, 1), (1, 2)));
    }

    #[test]
    fn test_range_from_term_rejects_bad_boundaries() {
        let doc = sample();
        assert_eq!(
            range_from_term(&doc, ((2, 4), (2, 4))),
            Err(RangeError::InvalidBoundary { node: 2, offset: 4, max: 3 })
        );
        assert_eq!(
            range_from_term(&doc, ((2, 0), (1, 3))),
            Err(RangeError::InvalidBoundary { node: 1, offset: 3, max: 2 })
        );
        assert_eq!(range_from_term(&doc, ((9, 0), (2, 0))), Err(RangeError::UnknownNode(9)));
    }

    #[test]
    fn test_boundary_on_leaf_element() {
        let doc = sample();
        assert!(boundary_from_term(&doc, (3, 0)).is_ok());
        assert!(boundary_from_term(&doc, (3, 1)).is_err());
    }
}
