use crate::{edge::Edge, node::Node, store::NodeStoreView};
use recon_time::Time;
use std::fmt::Debug;
use std::sync::Arc;

/// The mutation a [`NodeEvent`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// The node did not previously exist (from the producer's point of view).
    Create,
    /// The node previously existed and has new state.
    Update,
    /// The node no longer exists.
    Delete,
}

/// A capability attached to a node that computes its outgoing edges.
///
/// The source specification models this as a closure (`ComputeEdges`); we
/// encode it as a trait instead so a stored node stays `Debug`-able and
/// testable without needing to name an unnameable closure type. Concrete
/// transformers (see the `transforms` crate) implement this once per
/// resource kind and hand an `Arc<dyn EdgeBuilder>` to the event they emit.
pub trait EdgeBuilder: Debug + Send + Sync {
    /// Compute this node's outgoing edges against a read-only view of the
    /// current node set.
    ///
    /// Must be a pure function of `self` and `store` — no I/O, no shared
    /// mutable state. The reconciler isolates failures per-node: a panic or
    /// error here costs this node its edges for this resolution pass, not
    /// the whole graph's.
    fn build_edges(&self, store: &dyn NodeStoreView) -> Vec<Edge>;
}

/// An [`EdgeBuilder`] that never contributes any edges.
///
/// Delete events carry no edge-computation capability (there's nothing left
/// to compute edges from), but giving every `NodeEvent` a concrete value
/// avoids threading `Option` through call sites that don't care.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEdges;

impl EdgeBuilder for NoEdges {
    fn build_edges(&self, _store: &dyn NodeStoreView) -> Vec<Edge> {
        Vec::new()
    }
}

/// A single resource-mutation event, as produced by a transformer and handed
/// to the reconciler's event intake.
#[derive(Debug, Clone)]
pub struct NodeEvent {
    /// Producer-assigned timestamp, used to resolve out-of-order delivery.
    /// Not wall-clock "now" at the point the reconciler observes it.
    pub time: Time,
    /// The mutation this event applies.
    pub operation: Operation,
    /// Full replacement state. For `Delete`, only `node.uid` need be
    /// populated.
    pub node: Node,
    /// The node's edge-computation capability. `None` is only meaningful for
    /// `Delete` events.
    ///
    /// Private so the only way to build a `NodeEvent` is through
    /// [`NodeEvent::mutation`]/[`NodeEvent::delete`], which keeps this field
    /// in sync with `operation` — a `Create`/`Update` always carries `Some`.
    /// Without that, a caller could assemble a `Create` with `None` via a
    /// public struct literal; `is_malformed` has no way to catch that (it
    /// only looks at the UID), so the reconciler would later panic on an
    /// event that passed every validity check.
    compute_edges: Option<Arc<dyn EdgeBuilder>>,
}

impl NodeEvent {
    /// Build a `Create`/`Update` event.
    pub fn mutation(
        time: Time,
        operation: Operation,
        node: Node,
        compute_edges: Arc<dyn EdgeBuilder>,
    ) -> Self {
        debug_assert!(operation != Operation::Delete, "use NodeEvent::delete for deletes");
        Self {
            time,
            operation,
            node,
            compute_edges: Some(compute_edges),
        }
    }

    /// Build a `Delete` event. Only the UID of `node` need be set.
    pub fn delete(time: Time, node: Node) -> Self {
        Self {
            time,
            operation: Operation::Delete,
            node,
            compute_edges: None,
        }
    }

    /// The edge-computation capability carried by this event, if any.
    /// Always `Some` for `Create`/`Update`, always `None` for `Delete`.
    pub fn compute_edges(&self) -> Option<&Arc<dyn EdgeBuilder>> {
        self.compute_edges.as_ref()
    }

    /// A malformed event has no UID, or is a `Create`/`Update` whose node body
    /// is otherwise empty in a way that could never validly describe a
    /// resource (the UID standing in for "no body" since `Node` has no
    /// separate "absent" representation in Rust).
    pub fn is_malformed(&self) -> bool {
        self.node.uid.is_empty()
    }
}
