//! Recency List Module
//!
//! Arena-backed doubly-linked list ordering entries from most- to
//! least-recently-used.
//!
//! Entries live in a slot arena and link to each other through `EntryId`
//! handles instead of references, so splicing is O(1) and no raw pointers
//! are needed. Freed slots are recycled through a free list.

use crate::cache::{CacheEntry, EntryId};

// == Recency List ==
/// Ordered sequence of entries, head = most recently used, tail = least.
///
/// Structural invariants, restored by every method before it returns:
/// - head has no `prev`, tail has no `next`
/// - every interior entry's `prev`/`next` agree with its neighbors
/// - the list is acyclic and `len` counts exactly the occupied slots
#[derive(Debug, Default)]
pub struct RecencyList {
    /// Slot arena; `None` marks a free slot
    slots: Vec<Option<CacheEntry>>,
    /// Indices of free slots available for reuse
    free: Vec<usize>,
    /// Most recently used entry
    head: Option<EntryId>,
    /// Least recently used entry
    tail: Option<EntryId>,
    /// Number of live entries
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Accessors ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the most recently used entry, if any.
    pub fn head(&self) -> Option<EntryId> {
        self.head
    }

    /// Handle of the least recently used entry, if any.
    pub fn tail(&self) -> Option<EntryId> {
        self.tail
    }

    /// Borrows the entry behind a handle.
    pub fn get(&self, id: EntryId) -> Option<&CacheEntry> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Mutably borrows the entry behind a handle.
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut CacheEntry> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    // == Push Front ==
    /// Links a new entry at the head (most recently used position).
    ///
    /// The previous head, if any, becomes the new entry's successor.
    /// Returns the handle of the stored entry.
    pub fn push_front(&mut self, mut entry: CacheEntry) -> EntryId {
        entry.prev = None;
        entry.next = self.head;

        let id = self.alloc(entry);

        if let Some(old_head) = self.head {
            if let Some(node) = self.get_mut(old_head) {
                node.prev = Some(id);
            }
        } else {
            // List was empty, the new entry is also the tail
            self.tail = Some(id);
        }

        self.head = Some(id);
        self.len += 1;
        id
    }

    // == Move To Front ==
    /// Promotes an entry to the head without touching its key or value.
    ///
    /// No-op if the entry already sits at the head.
    pub fn move_to_front(&mut self, id: EntryId) {
        if self.head == Some(id) {
            return;
        }

        self.unlink(id);

        let old_head = self.head;
        if let Some(node) = self.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(head_id) = old_head {
            if let Some(node) = self.get_mut(head_id) {
                node.prev = Some(id);
            }
        }
        self.head = Some(id);
    }

    // == Remove ==
    /// Splices an entry out of the list and frees its slot.
    ///
    /// Handles all four structural cases (sole, head, tail, interior)
    /// through the `unlink` branches. Returns the removed entry, or None
    /// for a handle whose slot is already free.
    pub fn remove(&mut self, id: EntryId) -> Option<CacheEntry> {
        self.get(id)?;

        self.unlink(id);
        let entry = self.slots[id.0].take();
        self.free.push(id.0);
        self.len -= 1;
        entry
    }

    // == Unlink ==
    /// Detaches an entry from its neighbors, fixing head/tail as needed.
    ///
    /// The slot stays occupied; callers either relink the entry at the
    /// head or free the slot.
    fn unlink(&mut self, id: EntryId) {
        let (prev, next) = match self.get(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_id) => {
                if let Some(node) = self.get_mut(prev_id) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(node) = self.get_mut(next_id) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    // == Alloc ==
    /// Stores an entry in a free slot, growing the arena if none is available.
    fn alloc(&mut self, entry: CacheEntry) -> EntryId {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                EntryId(idx)
            }
            None => {
                self.slots.push(Some(entry));
                EntryId(self.slots.len() - 1)
            }
        }
    }

    // == Iteration ==
    /// Walks the list from head to tail, yielding each entry.
    ///
    /// O(n); used for invariant checks and tests, never on the hot path.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            next: self.head,
        }
    }
}

/// Head-to-tail iterator over a [`RecencyList`].
pub struct Iter<'a> {
    list: &'a RecencyList,
    next: Option<EntryId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CacheEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let entry = self.list.get(id)?;
        self.next = entry.next;
        Some(entry)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: &str) -> CacheEntry {
        CacheEntry::new(key.to_string(), value.to_string())
    }

    fn keys_front_to_back(list: &RecencyList) -> Vec<String> {
        list.iter().map(|e| e.key.clone()).collect()
    }

    #[test]
    fn test_list_new_is_empty() {
        let list = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
    }

    #[test]
    fn test_push_front_sets_head_and_tail() {
        let mut list = RecencyList::new();
        let id = list.push_front(entry("a", "1"));

        assert_eq!(list.len(), 1);
        assert_eq!(list.head(), Some(id));
        assert_eq!(list.tail(), Some(id));
        assert!(list.get(id).unwrap().prev.is_none());
        assert!(list.get(id).unwrap().next.is_none());
    }

    #[test]
    fn test_push_front_orders_most_recent_first() {
        let mut list = RecencyList::new();
        list.push_front(entry("a", "1"));
        list.push_front(entry("b", "2"));
        list.push_front(entry("c", "3"));

        assert_eq!(keys_front_to_back(&list), vec!["c", "b", "a"]);
        assert_eq!(list.get(list.tail().unwrap()).unwrap().key, "a");
    }

    #[test]
    fn test_move_to_front_from_tail() {
        let mut list = RecencyList::new();
        let a = list.push_front(entry("a", "1"));
        list.push_front(entry("b", "2"));
        list.push_front(entry("c", "3"));

        list.move_to_front(a);

        assert_eq!(keys_front_to_back(&list), vec!["a", "c", "b"]);
        assert_eq!(list.get(list.tail().unwrap()).unwrap().key, "b");
    }

    #[test]
    fn test_move_to_front_from_interior() {
        let mut list = RecencyList::new();
        list.push_front(entry("a", "1"));
        let b = list.push_front(entry("b", "2"));
        list.push_front(entry("c", "3"));

        list.move_to_front(b);

        assert_eq!(keys_front_to_back(&list), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_to_front_of_head_is_noop() {
        let mut list = RecencyList::new();
        list.push_front(entry("a", "1"));
        let b = list.push_front(entry("b", "2"));

        list.move_to_front(b);

        assert_eq!(keys_front_to_back(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_remove_sole_entry() {
        let mut list = RecencyList::new();
        let a = list.push_front(entry("a", "1"));

        let removed = list.remove(a).unwrap();

        assert_eq!(removed.key, "a");
        assert!(list.is_empty());
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
    }

    #[test]
    fn test_remove_head_entry() {
        let mut list = RecencyList::new();
        list.push_front(entry("a", "1"));
        let b = list.push_front(entry("b", "2"));

        list.remove(b);

        assert_eq!(keys_front_to_back(&list), vec!["a"]);
        assert_eq!(list.head(), list.tail());
    }

    #[test]
    fn test_remove_tail_entry() {
        let mut list = RecencyList::new();
        let a = list.push_front(entry("a", "1"));
        list.push_front(entry("b", "2"));

        list.remove(a);

        assert_eq!(keys_front_to_back(&list), vec!["b"]);
        assert_eq!(list.head(), list.tail());
    }

    #[test]
    fn test_remove_interior_entry_rewires_neighbors() {
        let mut list = RecencyList::new();
        let a = list.push_front(entry("a", "1"));
        let b = list.push_front(entry("b", "2"));
        let c = list.push_front(entry("c", "3"));

        list.remove(b);

        assert_eq!(keys_front_to_back(&list), vec!["c", "a"]);
        assert_eq!(list.get(c).unwrap().next, Some(a));
        assert_eq!(list.get(a).unwrap().prev, Some(c));
    }

    #[test]
    fn test_remove_twice_returns_none() {
        let mut list = RecencyList::new();
        let a = list.push_front(entry("a", "1"));

        assert!(list.remove(a).is_some());
        assert!(list.remove(a).is_none());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_slot_reuse_after_remove() {
        let mut list = RecencyList::new();
        let a = list.push_front(entry("a", "1"));
        list.remove(a);

        let b = list.push_front(entry("b", "2"));

        // The freed slot is recycled rather than growing the arena
        assert_eq!(b, a);
        assert_eq!(keys_front_to_back(&list), vec!["b"]);
    }
}
