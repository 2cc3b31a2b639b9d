use crate::{node::Node, uid::Uid};
use std::collections::BTreeSet;
use std::fmt::Debug;

/// A point-in-time, read-only projection of the current node set.
///
/// Passed to every [`crate::event::EdgeBuilder`] invoked during a single edge
/// resolution pass. Implementations must present an immutable snapshot for
/// the duration of that pass — an edge-builder must never observe a node
/// appear or disappear mid-resolution.
pub trait NodeStoreView: Debug {
    /// Look up a node by its exact UID.
    fn lookup(&self, uid: &Uid) -> Option<Node>;

    /// Resolve a symbolic `(kind, namespace, name)` reference to the set of
    /// UIDs currently registered under it.
    ///
    /// Namespace may be empty for cluster-scoped resources. Returns an empty
    /// set rather than `None` when nothing matches, since "no target yet" is
    /// an ordinary, expected state (the target node may simply not have
    /// arrived).
    fn by_kind_name(&self, kind: &str, namespace: &str, name: &str) -> BTreeSet<Uid>;
}
