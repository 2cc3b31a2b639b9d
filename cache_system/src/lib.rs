//! Bounded cache backends.
//!
//! This crate was carried over from a general-purpose, loader-backed async
//! cache (`CacheDriver` + `Loader`, for memoizing expensive async lookups
//! behind a shared handle). The reconciler has no such lookups — its only
//! caching need is the bounded, synchronously-accessed eviction backend in
//! [`backend::lru`] — so that's what survived; see `DESIGN.md` at the
//! workspace root for the full rationale.

pub mod backend;

pub use backend::lru::LruBackend;
