//! Shared data types for the cluster reconciler.
//!
//! This crate defines the wire-ish vocabulary shared by every other crate in
//! the workspace: [`Node`], [`Edge`], [`NodeEvent`], and the [`NodeStoreView`]
//! contract edge-builders are evaluated against. It depends on nothing
//! reconciler-specific so that transformer crates (see `transforms`) can
//! depend on it without pulling in the reconciliation loop itself.
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

mod edge;
mod event;
mod node;
mod properties;
mod store;
mod uid;

pub use edge::Edge;
pub use event::{EdgeBuilder, NoEdges, NodeEvent, Operation};
pub use node::Node;
pub use properties::{PropertyMap, PropertyValue, MetadataMap, KIND_KEY, NAME_KEY, NAMESPACE_KEY, OWNER_UID_KEY};
pub use store::NodeStoreView;
pub use uid::Uid;
