//! Cache Store Module
//!
//! Main cache engine combining the key index with the recency list and
//! byte-budget eviction.

use std::collections::HashMap;

use ahash::RandomState;
use tracing::debug;

use crate::cache::{CacheEntry, EntryId, RecencyList};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Byte-budgeted key-value store with LRU eviction.
///
/// Three structures move in lockstep on every mutation:
/// - the recency list, ordering entries from most- to least-recently-used
/// - the key index, mapping each key to its list handle
/// - `current_size`, the exact sum of `key.len() + value.len()` over all
///   live entries, never allowed to exceed `max_size`
///
/// Capacity is enforced proactively: tail entries are evicted before a
/// write proceeds, so the budget holds after every completed operation.
#[derive(Debug)]
pub struct CacheStore {
    /// Recency-ordered entries, owning all entry data
    list: RecencyList,
    /// Key to list-handle mapping, 1:1 with the list
    index: HashMap<String, EntryId, RandomState>,
    /// Hard upper bound on total stored bytes, fixed at construction
    max_size: usize,
    /// Running sum of key+value lengths over all live entries
    current_size: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given byte budget.
    ///
    /// # Arguments
    /// * `max_size` - Maximum total byte size (keys plus values) the store may hold
    pub fn new(max_size: usize) -> Self {
        Self {
            list: RecencyList::new(),
            index: HashMap::with_hasher(RandomState::new()),
            max_size,
            current_size: 0,
        }
    }

    /// Creates a CacheStore from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_size)
    }

    // == Put ==
    /// Stores a key-value pair, overwriting any existing value.
    ///
    /// Updates the existing entry in place when the key is present,
    /// otherwise inserts a fresh entry, evicting least-recently-used
    /// entries as needed to make room. Either way the touched entry
    /// becomes the most recently used.
    ///
    /// # Errors
    /// Returns [`CacheError::Oversized`] when the pair alone exceeds the
    /// byte budget; the store is left unchanged.
    pub fn put(&mut self, key: String, value: String) -> Result<()> {
        self.check_fits(&key, &value)?;

        match self.index.get(&key) {
            Some(&id) => self.update_entry(id, value),
            None => self.insert_entry(key, value),
        }
        Ok(())
    }

    // == Put If Absent ==
    /// Stores a key-value pair only if the key is not already present.
    ///
    /// # Errors
    /// Returns [`CacheError::AlreadyExists`] when the key is present and
    /// [`CacheError::Oversized`] when the pair alone exceeds the budget.
    /// In both cases the store is left unchanged.
    pub fn put_if_absent(&mut self, key: String, value: String) -> Result<()> {
        self.check_fits(&key, &value)?;

        if self.index.contains_key(&key) {
            return Err(CacheError::AlreadyExists(key));
        }

        self.insert_entry(key, value);
        Ok(())
    }

    // == Set ==
    /// Replaces the value of an existing key.
    ///
    /// The entry is promoted to most-recently-used before any eviction
    /// runs, so making room for a grown value can never evict the entry
    /// being updated.
    ///
    /// # Errors
    /// Returns [`CacheError::NotFound`] when the key is absent and
    /// [`CacheError::Oversized`] when the pair alone exceeds the budget.
    pub fn set(&mut self, key: String, value: String) -> Result<()> {
        self.check_fits(&key, &value)?;

        match self.index.get(&key) {
            Some(&id) => {
                self.update_entry(id, value);
                Ok(())
            }
            None => Err(CacheError::NotFound(key)),
        }
    }

    // == Get ==
    /// Retrieves a value by key, promoting the entry to most-recently-used.
    ///
    /// This is the only operation that changes recency order without a
    /// write. A miss has no side effect.
    ///
    /// # Errors
    /// Returns [`CacheError::NotFound`] when the key is absent.
    pub fn get(&mut self, key: &str) -> Result<String> {
        let &id = self
            .index
            .get(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        self.list.move_to_front(id);

        let value = self
            .list
            .get(id)
            .map(|entry| entry.value.clone())
            .expect("key index refers to a freed list slot");
        Ok(value)
    }

    // == Delete ==
    /// Removes an entry by key, decrementing the byte accounting.
    ///
    /// # Errors
    /// Returns [`CacheError::NotFound`] when the key is absent.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        match self.index.remove(key) {
            Some(id) => {
                let entry = self
                    .list
                    .remove(id)
                    .expect("key index refers to a freed list slot");
                self.current_size -= entry.size();
                Ok(())
            }
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    // == Accessors ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Checks whether a key is present, without touching recency order.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the total bytes currently stored.
    pub fn current_size(&self) -> usize {
        self.current_size
    }

    /// Returns the configured byte budget.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    // == Oversized Check ==
    /// Rejects pairs that could never fit, even into an empty store.
    fn check_fits(&self, key: &str, value: &str) -> Result<()> {
        let required = key.len() + value.len();
        if required > self.max_size {
            debug!(
                required,
                max_size = self.max_size,
                "rejecting entry larger than total capacity"
            );
            return Err(CacheError::Oversized {
                required,
                max_size: self.max_size,
            });
        }
        Ok(())
    }

    // == Fresh Insert ==
    /// Links a new entry at the head, evicting tail entries until it fits.
    ///
    /// Callers must have run the oversized check: `key.len() + value.len()`
    /// is at most `max_size`, so the eviction loop terminates no later than
    /// an empty store and never touches the entry being inserted.
    fn insert_entry(&mut self, key: String, value: String) {
        let new_size = key.len() + value.len();

        while self.current_size + new_size > self.max_size {
            self.evict_tail();
        }

        let id = self.list.push_front(CacheEntry::new(key.clone(), value));
        self.index.insert(key, id);
        self.current_size += new_size;
    }

    // == In-Place Update ==
    /// Replaces an existing entry's value and promotes it to the head.
    ///
    /// Promotion happens first: once the entry sits at the head, the
    /// eviction loop only ever removes other entries. With the oversized
    /// check already passed, a sole remaining entry always fits and the
    /// loop cannot run.
    fn update_entry(&mut self, id: EntryId, value: String) {
        self.list.move_to_front(id);

        let old_len = self
            .list
            .get(id)
            .map(|entry| entry.value.len())
            .expect("key index refers to a freed list slot");
        let new_len = value.len();

        while self.current_size - old_len + new_len > self.max_size {
            debug_assert_ne!(
                self.list.tail(),
                Some(id),
                "entry being updated must not evict itself"
            );
            self.evict_tail();
        }

        if let Some(entry) = self.list.get_mut(id) {
            entry.value = value;
        }
        self.current_size = self.current_size - old_len + new_len;
    }

    // == Eviction ==
    /// Removes the least-recently-used entry from list, index, and accounting.
    ///
    /// Only called while making room for a pending write, with the store
    /// non-empty.
    fn evict_tail(&mut self) {
        let tail = self
            .list
            .tail()
            .expect("eviction requires a non-empty store");
        let entry = self
            .list
            .remove(tail)
            .expect("tail handle refers to a freed list slot");

        self.index.remove(&entry.key);
        self.current_size -= entry.size();

        debug!(
            key_len = entry.key.len(),
            freed = entry.size(),
            "evicted least recently used entry"
        );
    }

    // == Invariant Check ==
    /// Verifies size accounting, list/index correspondence, and the byte
    /// budget from scratch. Test-only; O(n).
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        use std::collections::HashSet;

        let mut total = 0;
        let mut seen = HashSet::new();
        for entry in self.list.iter() {
            total += entry.size();
            assert!(
                seen.insert(entry.key.clone()),
                "duplicate key {:?} in recency list",
                entry.key
            );
            assert!(
                self.index.contains_key(&entry.key),
                "list key {:?} missing from index",
                entry.key
            );
        }

        assert_eq!(
            seen.len(),
            self.index.len(),
            "index and list disagree on key set"
        );
        assert_eq!(self.list.len(), self.index.len());
        assert_eq!(total, self.current_size, "size accounting drifted");
        assert!(
            self.current_size <= self.max_size,
            "current_size {} exceeds max_size {}",
            self.current_size,
            self.max_size
        );
    }

    /// Test-only view of recency order, most recent first.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<String> {
        self.list.iter().map(|entry| entry.key.clone()).collect()
    }
}
