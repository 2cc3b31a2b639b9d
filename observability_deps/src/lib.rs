//! A crate to ensure that we use consistent and compatible versions of
//! observability-related crates (currently just `tracing`) across the workspace.
//!
//! Import this crate's `tracing` re-export rather than depending on `tracing`
//! directly so every crate in the workspace pulls the same version.

pub use tracing;
