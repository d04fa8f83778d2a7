//! Parallel Range Normalization
//!
//! Uses Rayon to normalize a batch of ranges against one shared document.
//! Documents are immutable once built, so every range is independent.

use rayon::prelude::*;
use tracing::debug;

use crate::dom::DocumentAccess;
use crate::range::{normalize, Range};

/// Normalize every range in `ranges`, returning them in input order
pub fn normalize_parallel<D: DocumentAccess + Sync>(doc: &D, ranges: &[Range]) -> Vec<Range> {
    debug!(count = ranges.len(), "normalizing batch");
    ranges
        .par_iter()
        .map(|range| {
            let mut range = *range;
            normalize(doc, &mut range);
            range
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DocumentBuilder;
    use crate::range::Boundary;

    fn r(sc: u32, so: u32, ec: u32, eo: u32) -> Range {
        Range::new(Boundary::new(sc, so), Boundary::new(ec, eo))
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut b = DocumentBuilder::new();
        b.open("p");
        b.text("abc");
        b.text("defg");
        b.text("hijkl");
        b.close();
        let doc = b.finish().unwrap();

        let ranges = vec![r(2, 3, 4, 2), r(2, 1, 4, 0), r(1, 0, 1, 3), r(1, 2, 1, 2)];
        let results = normalize_parallel(&doc, &ranges);

        let sequential: Vec<Range> = ranges
            .iter()
            .map(|range| {
                let mut range = *range;
                normalize(&doc, &mut range);
                range
            })
            .collect();
        assert_eq!(results, sequential);
        assert_eq!(results[0], r(3, 0, 4, 2));
    }

    #[test]
    fn test_empty_batch() {
        let mut b = DocumentBuilder::new();
        b.empty("root");
        let doc = b.finish().unwrap();
        assert!(normalize_parallel(&doc, &[]).is_empty());
    }
}
