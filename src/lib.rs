//! LRU Store - A byte-budgeted in-memory key-value store
//!
//! Provides a fixed-capacity cache that evicts least-recently-used entries
//! whenever a write would exceed the configured byte budget.
//!
//! The core is single-threaded: callers needing concurrent access wrap the
//! store in their own synchronization (e.g. one lock around every operation).

pub mod cache;
pub mod config;
pub mod error;

pub use cache::CacheStore;
pub use config::Config;
pub use error::{CacheError, Result};
