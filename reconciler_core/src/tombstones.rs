use cache_system::LruBackend;
use graph_types::Uid;
use recon_time::Time;
use std::num::NonZeroUsize;

/// Bounded LRU of recently deleted UIDs and the time they were deleted.
///
/// Backs the reconciliation loop's tombstone guard (spec component A): a
/// late-arriving Create for a UID that's already been deleted is rejected by
/// comparing against the recorded deletion time, not by remembering every
/// delete forever.
#[derive(Debug)]
pub struct TombstoneCache {
    backend: LruBackend<Uid, Time>,
}

impl TombstoneCache {
    /// Create an empty cache bounded to `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            backend: LruBackend::new(capacity),
        }
    }

    /// Look up the deletion time recorded for `uid`. Counts as an access for
    /// LRU purposes — a frequently re-checked UID stays warm even if it's
    /// never deleted again.
    pub fn get(&mut self, uid: &Uid) -> Option<Time> {
        self.backend.get(uid)
    }

    /// Record (or refresh) the deletion time for `uid`, evicting the least
    /// recently used entry if the cache is at capacity.
    pub fn put(&mut self, uid: Uid, deleted_at: Time) {
        self.backend.put(uid, deleted_at);
    }

    /// Forget `uid` entirely — used when a later Create/Update resurrects it.
    pub fn remove(&mut self, uid: &Uid) -> Option<Time> {
        self.backend.remove(uid)
    }

    /// Number of tombstones currently held.
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    /// Whether the cache holds no tombstones.
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trips() {
        let mut cache = TombstoneCache::new(NonZeroUsize::new(2).unwrap());
        let uid = Uid::new("x");
        let t = Time::from_timestamp_secs(5);
        cache.put(uid.clone(), t);
        assert_eq!(cache.get(&uid), Some(t));
    }

    #[test]
    fn bounded_capacity_evicts_oldest() {
        let mut cache = TombstoneCache::new(NonZeroUsize::new(1).unwrap());
        cache.put(Uid::new("a"), Time::from_timestamp_secs(1));
        cache.put(Uid::new("b"), Time::from_timestamp_secs(2));
        assert_eq!(cache.get(&Uid::new("a")), None);
        assert_eq!(cache.get(&Uid::new("b")), Some(Time::from_timestamp_secs(2)));
    }

    #[test]
    fn remove_forgets_the_tombstone() {
        let mut cache = TombstoneCache::new(NonZeroUsize::new(2).unwrap());
        let uid = Uid::new("x");
        cache.put(uid.clone(), Time::from_timestamp_secs(1));
        assert_eq!(cache.remove(&uid), Some(Time::from_timestamp_secs(1)));
        assert_eq!(cache.get(&uid), None);
    }
}
