use graph_types::{Node, Uid, KIND_KEY, NAME_KEY, NAMESPACE_KEY, OWNER_UID_KEY};

/// Identity fields every transformer starts from: the pieces needed to build
/// a UID and populate the well-known `kind`/`namespace`/`name` properties
/// that the reconciler's secondary index relies on.
#[derive(Debug, Clone)]
pub struct ResourceIdentity {
    /// API kind, e.g. `"Pod"`.
    pub kind: String,
    /// Namespace, or empty for cluster-scoped resources.
    pub namespace: String,
    /// Resource name.
    pub name: String,
    /// The source cluster's own UID for this resource, before prefixing.
    pub raw_uid: String,
    /// UID of the Kubernetes object that owns this one, if any (from
    /// `ownerReferences`). Stashed in `Node.metadata`, not `properties`,
    /// matching the data model's split between display data and
    /// edge-builder bookkeeping.
    pub owner_uid: Option<String>,
}

/// Build the common `Node` shape shared by every transformer: a prefixed
/// UID plus the `kind`/`namespace`/`name` properties and, when present, the
/// owner back-reference in metadata.
pub fn transform_common(cluster_prefix: &str, identity: &ResourceIdentity) -> Node {
    let uid = Uid::prefixed(cluster_prefix, &identity.raw_uid);
    let mut node = Node::new(uid);
    node.properties.insert(KIND_KEY.into(), identity.kind.clone().into());
    node.properties.insert(NAMESPACE_KEY.into(), identity.namespace.clone().into());
    node.properties.insert(NAME_KEY.into(), identity.name.clone().into());
    if let Some(owner_uid) = &identity.owner_uid {
        node.metadata.insert(OWNER_UID_KEY.into(), Uid::prefixed(cluster_prefix, owner_uid).to_string());
    }
    node
}
