//! Cache Module
//!
//! Provides a byte-budgeted in-memory key-value store with LRU eviction.

mod entry;
mod list;
mod store;


// Re-export public types
pub use entry::{CacheEntry, EntryId};
pub use list::RecencyList;
pub use store::CacheStore;
