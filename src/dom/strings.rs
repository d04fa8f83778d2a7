//! String Interning Pool
//!
//! Deduplicating storage for element names and text content. Strings are
//! copied into one contiguous buffer and addressed by a u32 ID; ID 0 is
//! reserved for the empty string.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Location of an interned string inside the pool buffer: (offset, length)
#[derive(Debug, Clone, Copy)]
struct Entry(u32, u32);

/// String interning pool
///
/// Memory layout:
/// - `entries`: (offset, len) for each interned string ID
/// - `data`: backing buffer for all string bytes
/// - `hash_index`: hash -> list of IDs (handles rare collisions)
#[derive(Debug)]
pub struct StringPool {
    entries: Vec<Entry>,
    data: String,
    hash_index: HashMap<u64, Vec<u32>>,
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        let mut pool = StringPool {
            entries: Vec::with_capacity(256),
            data: String::with_capacity(4096),
            hash_index: HashMap::new(),
        };
        // Entry 0 is reserved for "no string"
        pool.entries.push(Entry(0, 0));
        pool
    }

    #[inline]
    fn compute_hash(s: &str) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }

    /// Intern a string, returning the ID of an existing copy when present
    pub fn intern(&mut self, s: &str) -> u32 {
        if s.is_empty() {
            return 0;
        }

        let hash = Self::compute_hash(s);

        if let Some(ids) = self.hash_index.get(&hash) {
            for &id in ids {
                if self.get_str(id) == Some(s) {
                    return id;
                }
            }
        }

        let offset = self.data.len() as u32;
        self.data.push_str(s);

        let id = self.entries.len() as u32;
        self.entries.push(Entry(offset, s.len() as u32));
        self.hash_index.entry(hash).or_default().push(id);

        id
    }

    /// Get a string by ID
    pub fn get_str(&self, id: u32) -> Option<&str> {
        let Entry(offset, len) = *self.entries.get(id as usize)?;
        let start = offset as usize;
        self.data.get(start..start + len as usize)
    }
}
