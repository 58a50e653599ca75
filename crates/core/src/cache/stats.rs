//! Point-in-time counters for a ring cache.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Counters reported by `BoundedEventCache::stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CacheStats {
    /// Label given to the cache at construction.
    pub name: String,
    /// Entries currently stored.
    pub count: usize,
    /// Maximum entries retained.
    pub capacity: usize,
    /// Entries added over the cache's lifetime.
    pub total_added: u64,
    /// Entries evicted to make room for newer ones.
    pub total_evicted: u64,
}

impl CacheStats {
    /// Fraction of capacity in use, between 0.0 and 1.0.
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.count as f64 / self.capacity as f64
    }
}
