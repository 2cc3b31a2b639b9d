//! A minimal, dependency-light metrics registry used to instrument the reconciler.
//!
//! Mirrors the shape of a typical IOx-style metrics crate: a process-wide
//! [`Registry`] hands out strongly typed [`Metric`] handles, which in turn hand
//! out per-label-set recorders (e.g. [`U64Counter`]).
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    fmt::Debug,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

/// A set of key/value label pairs attached to a metric recording.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// Create a new, empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<const N: usize> From<[(&'static str, &'static str); N]> for Attributes {
    fn from(pairs: [(&'static str, &'static str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// A monotonically increasing counter of `u64` values.
#[derive(Debug, Default)]
pub struct U64Counter(AtomicU64);

impl U64Counter {
    /// Increment the counter by `delta`.
    pub fn inc(&self, delta: u64) {
        self.0.fetch_add(delta, Ordering::Relaxed);
    }

    /// Read the current value. Intended for tests and debugging.
    pub fn fetch(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// A family of recorders sharing a name and description, differentiated by
/// [`Attributes`].
#[derive(Debug)]
pub struct Metric<T> {
    recorders: Mutex<BTreeMap<Attributes, Arc<T>>>,
}

impl<T: Default> Metric<T> {
    /// Fetch (creating if necessary) the recorder for the given `attributes`.
    pub fn recorder(&self, attributes: impl Into<Attributes>) -> Arc<T> {
        let mut recorders = self.recorders.lock();
        Arc::clone(
            recorders
                .entry(attributes.into())
                .or_insert_with(|| Arc::new(T::default())),
        )
    }
}

impl<T> Default for Metric<T> {
    fn default() -> Self {
        Self {
            recorders: Mutex::new(BTreeMap::new()),
        }
    }
}

/// A process-wide registry of named metrics.
///
/// A single `Registry` is expected to be shared (via `Arc`) across a process;
/// each distinct metric name should only be registered once.
#[derive(Debug, Default)]
pub struct Registry {
    metrics: Mutex<BTreeMap<&'static str, Arc<dyn std::any::Any + Send + Sync>>>,
}

impl Registry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or fetch an already-registered) metric of type `T` under `name`.
    ///
    /// `description` is accepted for documentation purposes and is not currently
    /// surfaced anywhere; it exists so call sites read the same way a real
    /// exporter-backed registry would.
    pub fn register_metric<T>(&self, name: &'static str, _description: &'static str) -> Arc<Metric<T>>
    where
        T: Default + Send + Sync + 'static,
    {
        let mut metrics = self.metrics.lock();
        let entry = metrics
            .entry(name)
            .or_insert_with(|| Arc::new(Metric::<T>::default()) as Arc<dyn std::any::Any + Send + Sync>);
        Arc::clone(entry)
            .downcast::<Metric<T>>()
            .expect("metric registered twice under the same name with different types")
    }
}
