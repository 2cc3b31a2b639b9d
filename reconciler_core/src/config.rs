use std::num::NonZeroUsize;

/// The default bound on the tombstone cache (component A), chosen so that a
/// burst of deletes across a mid-size cluster doesn't evict the defence
/// against late Creates before the observer has a chance to catch up.
pub const DEFAULT_TOMBSTONE_CACHE_CAPACITY: usize = 20_000;

/// The default prefix prepended to every UID so cross-cluster IDs reported
/// into the same aggregator stay unique.
pub const DEFAULT_CLUSTER_PREFIX: &str = "local-cluster";

/// Tunables for a [`crate::Reconciler`].
///
/// There is deliberately no CLI flag parsing, env var reading, or file
/// loading here — the core never learns its configuration from anything but
/// its caller.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Bound on the tombstone cache. See [`DEFAULT_TOMBSTONE_CACHE_CAPACITY`].
    pub tombstone_cache_capacity: NonZeroUsize,
    /// Prefix prepended to UIDs produced by this reconciler's cluster.
    pub cluster_prefix: String,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            tombstone_cache_capacity: NonZeroUsize::new(DEFAULT_TOMBSTONE_CACHE_CAPACITY)
                .expect("non-zero constant"),
            cluster_prefix: DEFAULT_CLUSTER_PREFIX.to_string(),
        }
    }
}
