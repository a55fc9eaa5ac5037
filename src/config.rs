//! Configuration Module
//!
//! Handles loading and managing store configuration from environment variables.

use std::env;

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum total byte size (sum of key and value lengths) the cache may hold
    pub max_size: usize,
}

/// Default byte budget when none is configured (1 MiB).
pub const DEFAULT_MAX_SIZE: usize = 1024 * 1024;

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_SIZE_BYTES` - Maximum total cache size in bytes (default: 1048576)
    pub fn from_env() -> Self {
        Self {
            max_size: env::var("MAX_SIZE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SIZE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}
