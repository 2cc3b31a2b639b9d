use crate::common::{transform_common, ResourceIdentity};
use crate::owner::OwnerEdgeBuilder;
use graph_types::{Edge, EdgeBuilder, Node, NodeStoreView};

/// Raw fields pulled out of a `Policy` custom resource.
#[derive(Debug, Clone)]
pub struct PolicyResource {
    /// Resource identity.
    pub identity: ResourceIdentity,
    /// `spec.remediationAction`.
    pub remediation_action: String,
    /// `status.compliant`.
    pub compliant: String,
    /// `status.valid`.
    pub valid: bool,
    /// Total rule count across every role template, flattened ahead of time.
    pub num_rules: i64,
}

/// Transforms a [`PolicyResource`] into a [`Node`].
///
/// Grounded on `transformPolicy` in the original collector: the same four
/// properties (`remediationAction`, `compliant`, `valid`, `numRules`) on top
/// of the common identity fields.
#[derive(Debug, Clone)]
pub struct PolicyTransformer {
    node: Node,
    owner_edges: OwnerEdgeBuilder,
}

impl PolicyTransformer {
    /// Build the node and edge-builder for `resource`.
    pub fn new(cluster_prefix: &str, resource: PolicyResource) -> Self {
        let mut node = transform_common(cluster_prefix, &resource.identity);
        node.properties.insert("kind".into(), "Policy".into());
        node.properties.insert("remediationAction".into(), resource.remediation_action.into());
        node.properties.insert("compliant".into(), resource.compliant.into());
        node.properties.insert("valid".into(), resource.valid.into());
        node.properties.insert("numRules".into(), resource.num_rules.into());

        let owner_edges = OwnerEdgeBuilder::for_node(&node, "Policy");
        Self { node, owner_edges }
    }

    /// A pure projection of the Policy into the graph schema.
    pub fn build_node(&self) -> Node {
        self.node.clone()
    }
}

impl EdgeBuilder for PolicyTransformer {
    fn build_edges(&self, store: &dyn NodeStoreView) -> Vec<Edge> {
        self.owner_edges.build_edges(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_rules_onto_the_node() {
        let resource = PolicyResource {
            identity: ResourceIdentity {
                kind: "Policy".into(),
                namespace: "default".into(),
                name: "role-policy".into(),
                raw_uid: "policy-uid-1".into(),
                owner_uid: None,
            },
            remediation_action: "enforce".into(),
            compliant: "Compliant".into(),
            valid: true,
            num_rules: 3,
        };
        let node = PolicyTransformer::new("local-cluster", resource).build_node();
        assert_eq!(node.properties.get("numRules"), Some(&graph_types::PropertyValue::Int(3)));
    }
}
