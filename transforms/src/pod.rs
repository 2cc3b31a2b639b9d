use crate::common::{transform_common, ResourceIdentity};
use crate::owner::OwnerEdgeBuilder;
use graph_types::{Edge, EdgeBuilder, Node, NodeStoreView};

/// Raw fields this crate needs out of a Kubernetes Pod to build a graph node.
///
/// A stand-in for the full `corev1.Pod` type: only the fields the graph
/// schema actually surfaces are modeled here.
#[derive(Debug, Clone)]
pub struct PodResource {
    /// Resource identity (UID, namespace, name, owner reference).
    pub identity: ResourceIdentity,
    /// `status.phase`, e.g. `"Running"`.
    pub phase: String,
    /// `spec.nodeName`, the node this pod is scheduled onto, if any.
    pub node_name: Option<String>,
    /// Container image references, for the `image` property.
    pub images: Vec<String>,
    /// `spec.hostNetwork`.
    pub host_network: bool,
}

/// Transforms a [`PodResource`] into a [`Node`] plus its owner edge.
///
/// Grounded on the shape of `transformPolicy`/`PolicyReportResourceBuilder`
/// in the original collector: pull the common identity fields, then stamp
/// kind-specific properties on top.
#[derive(Debug, Clone)]
pub struct PodTransformer {
    node: Node,
    owner_edges: OwnerEdgeBuilder,
}

impl PodTransformer {
    /// Build the node and edge-builder for `resource`, with UIDs prefixed
    /// by `cluster_prefix`.
    pub fn new(cluster_prefix: &str, resource: PodResource) -> Self {
        let mut node = transform_common(cluster_prefix, &resource.identity);
        node.properties.insert("kind".into(), "Pod".into());
        node.properties.insert("status".into(), resource.phase.into());
        node.properties.insert("hostNetwork".into(), resource.host_network.into());
        if let Some(node_name) = resource.node_name {
            node.properties.insert("_hostName".into(), node_name.into());
        }
        if !resource.images.is_empty() {
            node.properties.insert(
                "image".into(),
                graph_types::PropertyValue::StringList(resource.images),
            );
        }

        let owner_edges = OwnerEdgeBuilder::for_node(&node, "Pod");
        Self { node, owner_edges }
    }

    /// A pure projection of the Pod into the graph schema.
    pub fn build_node(&self) -> Node {
        self.node.clone()
    }
}

impl EdgeBuilder for PodTransformer {
    fn build_edges(&self, store: &dyn NodeStoreView) -> Vec<Edge> {
        self.owner_edges.build_edges(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ResourceIdentity {
        ResourceIdentity {
            kind: "Pod".into(),
            namespace: "default".into(),
            name: "web-0".into(),
            raw_uid: "pod-uid-1".into(),
            owner_uid: Some("rs-uid-1".into()),
        }
    }

    #[test]
    fn build_node_carries_kind_and_status() {
        let resource = PodResource {
            identity: identity(),
            phase: "Running".into(),
            node_name: Some("node-a".into()),
            images: vec!["nginx:1.25".into()],
            host_network: false,
        };
        let transformer = PodTransformer::new("local-cluster", resource);
        let node = transformer.build_node();

        assert_eq!(node.kind(), Some("Pod"));
        assert_eq!(node.name(), Some("web-0"));
        assert_eq!(node.uid.as_str(), "local-cluster/pod-uid-1");
    }
}
