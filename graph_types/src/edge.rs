use crate::uid::Uid;
use serde::{Deserialize, Serialize};

/// A directed, labelled arc between two nodes.
///
/// Edges are always derived: they are never part of `currentNodes` and are
/// recomputed from scratch by the edge resolver whenever a diff or snapshot
/// is produced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// UID of the node the edge originates from.
    pub source_uid: Uid,
    /// UID of the node the edge points to.
    pub dest_uid: Uid,
    /// The edge's label, e.g. `"ownedBy"`.
    pub edge_type: String,
    /// Informational kind of the source node, if known.
    pub source_kind: Option<String>,
    /// Informational kind of the destination node, if known.
    pub dest_kind: Option<String>,
}

impl Edge {
    /// Construct an edge with no kind information.
    pub fn new(source_uid: impl Into<Uid>, dest_uid: impl Into<Uid>, edge_type: impl Into<String>) -> Self {
        Self {
            source_uid: source_uid.into(),
            dest_uid: dest_uid.into(),
            edge_type: edge_type.into(),
            source_kind: None,
            dest_kind: None,
        }
    }

    /// True if this edge loops back to the node it starts from. Self-edges
    /// are dropped by the edge resolver.
    pub fn is_self_edge(&self) -> bool {
        self.source_uid == self.dest_uid
    }
}
