//! RustyRange - Range boundary normalization over document trees
//!
//! Documents are built once from Elixir tree terms and held as resources;
//! ranges are `{{start_id, start_off}, {end_id, end_off}}` tuples over
//! their node ids.
//!
//! - `build`, `node_at_path`, `get_node`: document construction and lookup
//! - `normalize`, `normalize_many`: canonical leaf placement of boundaries
//! - `range_text`, `compare_points`: reading ranges

use rustler::{Encoder, Env, ResourceArc, Term};

mod config;
mod dom;
mod error;
mod range;
mod resource;
mod strategy;
mod term;
#[cfg(test)]
mod testing;

use config::NativeConfig;
use error::{RangeError, RangeResult};
use range::Range;
use resource::{DocumentRef, DocumentResource};
use term::{boundary_from_term, node_to_term, range_from_term, range_to_term, BoundaryTerm, RangeTerm};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Documents
// ============================================================================

/// Build a document from a tree term (returns {:ok, doc} or {:error, reason})
#[rustler::nif(schedule = "DirtyCpu")]
fn build<'a>(tree: Term<'a>) -> Result<DocumentRef, String> {
    let doc = term::decode_tree(tree).map_err(|e| e.to_string())?;
    tracing::debug!(nodes = doc.node_count(), "document built");
    Ok(ResourceArc::new(DocumentResource::new(doc)))
}

/// Resolve a child-index path from the root element
#[rustler::nif]
fn node_at_path(doc_ref: DocumentRef, path: Vec<u32>) -> Option<u32> {
    doc_ref
        .with_document(|doc| doc.node_at_path(&path))
        .ok()
        .flatten()
}

/// Get a node as a tree term
#[rustler::nif]
fn get_node<'a>(env: Env<'a>, doc_ref: DocumentRef, id: u32) -> Term<'a> {
    doc_ref
        .with_document(|doc| node_to_term(env, doc, id))
        .unwrap_or_else(|_| rustler::types::atom::nil().encode(env))
}

// ============================================================================
// Ranges
// ============================================================================

fn unavailable(reason: &'static str) -> String {
    RangeError::DocumentUnavailable(reason).to_string()
}

/// Normalize one range (returns {:ok, range} or {:error, reason})
#[rustler::nif]
fn normalize(doc_ref: DocumentRef, range: RangeTerm) -> Result<RangeTerm, String> {
    doc_ref
        .with_document(|doc| -> Result<RangeTerm, String> {
            let mut range = range_from_term(doc, range).map_err(|e| e.to_string())?;
            range::normalize(doc, &mut range);
            Ok(range_to_term(&range))
        })
        .map_err(unavailable)?
}

/// Normalize a batch of ranges in parallel; one result per input, in order
#[rustler::nif(schedule = "DirtyCpu")]
fn normalize_many(
    doc_ref: DocumentRef,
    ranges: Vec<RangeTerm>,
) -> Result<Vec<Result<RangeTerm, String>>, String> {
    doc_ref
        .with_document(|doc| {
            let mut decoded: Vec<RangeResult<Range>> = ranges
                .into_iter()
                .map(|t| range_from_term(doc, t))
                .collect();

            let valid: Vec<Range> = decoded.iter().filter_map(|r| r.as_ref().ok().copied()).collect();
            let mut normalized = strategy::normalize_parallel(doc, &valid).into_iter();
            for slot in decoded.iter_mut() {
                if let Ok(range) = slot {
                    if let Some(n) = normalized.next() {
                        *range = n;
                    }
                }
            }

            decoded
                .into_iter()
                .map(|r| r.map(|range| range_to_term(&range)).map_err(|e| e.to_string()))
                .collect()
        })
        .map_err(unavailable)
}

/// Text covered by a range (returns {:ok, binary} or {:error, reason})
#[rustler::nif]
fn range_text(doc_ref: DocumentRef, range: RangeTerm) -> Result<String, String> {
    doc_ref
        .with_document(|doc| -> Result<String, String> {
            let range = range_from_term(doc, range).map_err(|e| e.to_string())?;
            Ok(range::range_text(doc, &range))
        })
        .map_err(unavailable)?
}

/// Document-order comparison: -1, 0, 1, or nil for unrelated or invalid points
#[rustler::nif]
fn compare_points(doc_ref: DocumentRef, a: BoundaryTerm, b: BoundaryTerm) -> Option<i32> {
    doc_ref
        .with_document(|doc| -> RangeResult<Option<i32>> {
            let a = boundary_from_term(doc, a)?;
            let b = boundary_from_term(doc, b)?;
            Ok(range::compare_points(doc, a, b).map(|ord| ord as i32))
        })
        .ok()
        .and_then(|r| r.ok())
        .flatten()
}

// ============================================================================
// NIF Initialization
// ============================================================================

fn load(_env: Env, info: Term) -> bool {
    let config = NativeConfig::from_load_info(info);
    config::init_logging(&config);
    true
}

rustler::init!("Elixir.RustyRange.Native", load = load);
