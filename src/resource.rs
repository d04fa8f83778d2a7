//! ResourceArc Wrappers
//!
//! Persistent state for built documents, shared with the BEAM by reference.

use rustler::ResourceArc;
use std::sync::Mutex;

use crate::dom::Document;

/// Wrapper for Document that can be stored in a ResourceArc.
/// The tree is built once; every range call borrows it.
pub struct DocumentResource {
    pub doc: Mutex<Option<Document>>,
}

impl DocumentResource {
    pub fn new(doc: Document) -> Self {
        DocumentResource {
            doc: Mutex::new(Some(doc)),
        }
    }

    /// Run `f` against the stored document.
    ///
    /// # Errors
    ///
    /// Returns `"mutex_poisoned"` if the document mutex is poisoned,
    /// or `"no_document"` if no document is present.
    pub fn with_document<F, R>(&self, f: F) -> Result<R, &'static str>
    where
        F: FnOnce(&Document) -> R,
    {
        let guard = self.doc.lock().map_err(|_| "mutex_poisoned")?;
        let doc = guard.as_ref().ok_or("no_document")?;
        Ok(f(doc))
    }
}

#[rustler::resource_impl]
impl rustler::Resource for DocumentResource {}

impl Default for DocumentResource {
    fn default() -> Self {
        DocumentResource {
            doc: Mutex::new(None),
        }
    }
}

/// Type alias for document ResourceArc
pub type DocumentRef = ResourceArc<DocumentResource>;
