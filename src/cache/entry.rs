//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their arena handles.

// == Entry Id ==
/// Stable handle to an entry slot in the recency-list arena.
///
/// Handles are plain indices, so the key index and the list never hold
/// live references into the same memory. A handle is valid only while the
/// slot it names is occupied; the store removes a key's handle from the
/// index in the same operation that frees its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryId(pub(crate) usize);

// == Cache Entry ==
/// Represents a single cache entry with its position in the recency order.
///
/// `prev` points toward more-recently-used entries, `next` toward
/// less-recently-used ones. The head of the list has no `prev`; the tail
/// has no `next`.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored key
    pub key: String,
    /// The stored value
    pub value: String,
    /// Handle of the entry just more recently used, None at the head
    pub(crate) prev: Option<EntryId>,
    /// Handle of the entry just less recently used, None at the tail
    pub(crate) next: Option<EntryId>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an unlinked entry; the recency list wires `prev`/`next`
    /// when the entry is pushed to the front.
    pub fn new(key: String, value: String) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    // == Size ==
    /// Byte size charged against the cache budget: key length plus value length.
    pub fn size(&self) -> usize {
        self.key.len() + self.value.len()
    }
}
