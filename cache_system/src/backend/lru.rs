//! A fixed-capacity, least-recently-used eviction backend.

use super::CacheBackend;
use observability_deps::tracing::trace;
use std::{fmt::Debug, hash::Hash, num::NonZeroUsize};

/// A bounded map that evicts its least-recently-used entry once `capacity` is
/// exceeded.
///
/// `get` counts as a use; `peek` does not. This mirrors the tombstone cache's
/// requirement that re-checking a UID keeps it warm, while the reconciler's
/// own book-keeping reads never should.
#[derive(Debug)]
pub struct LruBackend<K, V> {
    inner: lru::LruCache<K, V>,
}

impl<K, V> LruBackend<K, V>
where
    K: Clone + Eq + Hash + Debug + Send,
    V: Clone + Debug + Send,
{
    /// Create a new, empty backend bounded to `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: lru::LruCache::new(capacity),
        }
    }

    /// The configured capacity.
    pub fn capacity(&self) -> NonZeroUsize {
        self.inner.cap()
    }

    /// Look up `k` without promoting it in recency order.
    pub fn peek(&self, k: &K) -> Option<V> {
        self.inner.peek(k).cloned()
    }

    /// Insert or overwrite `k`, evicting the LRU entry if at capacity.
    ///
    /// Returns the evicted entry, if any eviction occurred as a result of this
    /// insert.
    pub fn put(&mut self, k: K, v: V) -> Option<(K, V)> {
        let evicted = self.inner.push(k, v);
        if let Some((evicted_key, _)) = &evicted {
            trace!(?evicted_key, "evicting least-recently-used cache entry");
        }
        evicted
    }
}

impl<K, V> CacheBackend for LruBackend<K, V>
where
    K: Clone + Eq + Hash + Debug + Send + 'static,
    V: Clone + Debug + Send + 'static,
{
    type K = K;
    type V = V;

    fn get(&mut self, k: &K) -> Option<V> {
        self.inner.get(k).cloned()
    }

    fn peek(&self, k: &K) -> Option<V> {
        LruBackend::peek(self, k)
    }

    fn set(&mut self, k: K, v: V) {
        self.put(k, v);
    }

    fn remove(&mut self, k: &K) -> Option<V> {
        self.inner.pop(k)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
