//! Cache backend abstractions.

pub mod lru;

use std::fmt::Debug;
use std::hash::Hash;

/// A bounded key/value store with an explicit eviction policy.
///
/// Implementations own their entries outright (no loader, no sharing) — the
/// caller is responsible for serializing access the same way the rest of the
/// reconciler does: by holding `&mut self` for the duration of a mutation.
pub trait CacheBackend: Debug + Send + 'static {
    /// The key type.
    type K: Clone + Eq + Hash + Debug + Send;
    /// The value type.
    type V: Clone + Debug + Send;

    /// Look up `k`, counting as an access for recency purposes.
    fn get(&mut self, k: &Self::K) -> Option<Self::V>;

    /// Look up `k` without affecting recency.
    fn peek(&self, k: &Self::K) -> Option<Self::V>;

    /// Insert or overwrite the value for `k`, evicting the least-recently-used
    /// entry if the backend is at capacity.
    fn set(&mut self, k: Self::K, v: Self::V);

    /// Remove `k`, returning its previous value if present.
    fn remove(&mut self, k: &Self::K) -> Option<Self::V>;

    /// Number of entries currently stored.
    fn len(&self) -> usize;

    /// Whether the backend holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
