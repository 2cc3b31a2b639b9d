use graph_types::{Edge, EdgeBuilder, Node, NodeStoreView, Uid, OWNER_UID_KEY};

/// The edge type stamped on an owner back-reference, matching the label
/// every resource-specific transformer in this crate reuses.
pub const OWNED_BY_EDGE_TYPE: &str = "ownedBy";

/// Emits a single `ownedBy` edge from a node to its owning resource, if one
/// was recorded in `Node.metadata` under [`OWNER_UID_KEY`].
///
/// Every transformer in this crate embeds one of these alongside its own
/// resource-specific edges: owner back-references are common to practically
/// every Kubernetes resource, so it's factored out rather than reimplemented
/// per kind.
#[derive(Debug, Clone)]
pub struct OwnerEdgeBuilder {
    source_uid: Uid,
    source_kind: String,
    owner_uid: Option<Uid>,
}

impl OwnerEdgeBuilder {
    /// Build an owner-edge emitter for `node`, reading the owner UID (if
    /// any) out of its metadata.
    pub fn for_node(node: &Node, kind: impl Into<String>) -> Self {
        Self {
            source_uid: node.uid.clone(),
            source_kind: kind.into(),
            owner_uid: node.metadata.get(OWNER_UID_KEY).map(Uid::new),
        }
    }
}

impl EdgeBuilder for OwnerEdgeBuilder {
    fn build_edges(&self, store: &dyn NodeStoreView) -> Vec<Edge> {
        let Some(owner_uid) = &self.owner_uid else {
            return Vec::new();
        };
        let dest_kind = store.lookup(owner_uid).and_then(|n| n.kind().map(str::to_string));
        vec![Edge {
            source_uid: self.source_uid.clone(),
            dest_uid: owner_uid.clone(),
            edge_type: OWNED_BY_EDGE_TYPE.to_string(),
            source_kind: Some(self.source_kind.clone()),
            dest_kind,
        }]
    }
}
