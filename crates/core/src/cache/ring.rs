//! Fixed-capacity ring cache of the most recent events.
//!
//! The cache keeps at most `capacity` entries in insertion order. Once full,
//! every insertion evicts exactly one entry, the oldest, before appending the
//! new one. All mutation happens under a single write guard so concurrent
//! writers serialize cleanly; readers clone a snapshot under a read guard.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use parking_lot::RwLock;

use super::stats::CacheStats;
use crate::Error;

const UNNAMED: &str = "events";

/// Bounded, insertion-ordered, thread-safe event cache.
///
/// Share it between handlers as `Arc<BoundedEventCache<T>>`.
#[derive(Debug)]
pub struct BoundedEventCache<T> {
    name: String,
    capacity: NonZeroUsize,
    inner: RwLock<Ring<T>>,
}

#[derive(Debug)]
struct Ring<T> {
    entries: VecDeque<T>,
    total_added: u64,
    total_evicted: u64,
}

impl<T> BoundedEventCache<T> {
    /// Create an empty cache that retains at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self, Error> {
        Self::with_name(UNNAMED, capacity)
    }

    /// Create an empty cache labelled `name` for logs and stats.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `capacity` is 0.
    pub fn with_name(name: impl Into<String>, capacity: usize) -> Result<Self, Error> {
        let name = name.into();
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| Error::InvalidArgument(format!("cache '{name}' capacity must be at least 1")))?;

        tracing::debug!(cache = %name, capacity = capacity.get(), "created bounded event cache");

        Ok(Self {
            name,
            capacity,
            inner: RwLock::new(Ring {
                entries: VecDeque::with_capacity(capacity.get()),
                total_added: 0,
                total_evicted: 0,
            }),
        })
    }

    /// Append `entry`, evicting the oldest entry first if the cache is full.
    pub fn add(&self, entry: T) {
        let evicted = {
            let mut ring = self.inner.write();
            let evicted = if ring.entries.len() >= self.capacity.get() {
                ring.entries.pop_front()
            } else {
                None
            };
            ring.entries.push_back(entry);
            ring.total_added += 1;
            if evicted.is_some() {
                ring.total_evicted += 1;
            }
            evicted
        };

        // dropped outside the guard
        if evicted.is_some() {
            tracing::trace!(cache = %self.name, "evicted oldest entry");
        }
    }

    /// Number of entries currently stored.
    pub fn count(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.inner.read().entries.len() == self.capacity.get()
    }

    /// Point-in-time counters for this cache.
    pub fn stats(&self) -> CacheStats {
        let ring = self.inner.read();
        CacheStats {
            name: self.name.clone(),
            count: ring.entries.len(),
            capacity: self.capacity.get(),
            total_added: ring.total_added,
            total_evicted: ring.total_evicted,
        }
    }
}

impl<T: Clone> BoundedEventCache<T> {
    /// Snapshot of the current contents, oldest first.
    pub fn elements(&self) -> Vec<T> {
        let ring = self.inner.read();
        ring.entries.iter().cloned().collect()
    }

    /// Snapshot of the current contents, newest first.
    pub fn elements_reversed(&self) -> Vec<T> {
        let ring = self.inner.read();
        ring.entries.iter().rev().cloned().collect()
    }
}
