//! Sample producer-side transformers.
//!
//! The reconciliation loop itself has no idea a Pod or a Policy exists — it
//! only ever sees [`graph_types::Node`]s and [`graph_types::EdgeBuilder`]s.
//! This crate shows how a transformer bridges the two: turn a raw resource
//! into a `Node` via a pure projection, and implement `EdgeBuilder` on the
//! same type for the edges that resource contributes once it's in the store.
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

mod common;
mod owner;
mod pod;
mod policy;
mod policy_report;

pub use common::{transform_common, ResourceIdentity};
pub use owner::{OwnerEdgeBuilder, OWNED_BY_EDGE_TYPE};
pub use pod::{PodResource, PodTransformer};
pub use policy::{PolicyResource, PolicyTransformer};
pub use policy_report::{PolicyReportResource, PolicyReportTransformer, ReportResult};
