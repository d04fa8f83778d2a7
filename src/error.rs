//! Errors surfaced at the crate boundary.
//!
//! Normalization itself never fails; these cover building documents and
//! decoding caller-supplied boundaries.

use crate::dom::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("offset {offset} out of bounds for node {node} (max {max})")]
    InvalidBoundary { node: NodeId, offset: u32, max: u32 },

    #[error("document unavailable: {0}")]
    DocumentUnavailable(&'static str),
}

pub type RangeResult<T> = Result<T, RangeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(RangeError::UnknownNode(7).to_string(), "unknown node: 7");
        assert_eq!(
            RangeError::InvalidBoundary { node: 3, offset: 9, max: 4 }.to_string(),
            "offset 9 out of bounds for node 3 (max 4)"
        );
        assert_eq!(
            RangeError::DocumentUnavailable("no_document").to_string(),
            "document unavailable: no_document"
        );
    }
}
