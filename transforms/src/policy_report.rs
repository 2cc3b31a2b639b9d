use crate::common::{transform_common, ResourceIdentity};
use graph_types::{Edge, EdgeBuilder, Node, NodeStoreView, PropertyValue};
use std::collections::BTreeSet;

const REPORTED_BY_EDGE_TYPE: &str = "reportedBy";
const CLUSTER_SCOPE_NAMESPACE: &str = "_NONE";

/// One rule-violation entry inside a `PolicyReport`/`ClusterPolicyReport`.
#[derive(Debug, Clone)]
pub struct ReportResult {
    /// `policy` field — `"<namespace>/<name>"` for a `Policy`, just `"<name>"`
    /// for a `ClusterPolicy`.
    pub policy: String,
    /// Comma-separated category list.
    pub category: String,
    /// `pass`/`fail`/`error`/etc.
    pub result: String,
    /// `"1"`..`"4"`, low to critical.
    pub total_risk: String,
    /// `"insights"` for GRC-sourced results, anything else for engine-sourced
    /// ones (e.g. Kyverno).
    pub source: String,
}

/// Raw fields pulled out of a `PolicyReport`/`ClusterPolicyReport` resource.
#[derive(Debug, Clone)]
pub struct PolicyReportResource {
    /// Resource identity.
    pub identity: ResourceIdentity,
    /// Every result attached to the report.
    pub results: Vec<ReportResult>,
    /// True if `metadata.labels["app.kubernetes.io/managed-by"] == "kyverno"`.
    pub managed_by_kyverno: bool,
    /// Name of the cluster this report scopes to (`spec.scope.name`).
    pub scope: String,
}

/// Transforms a [`PolicyReportResource`] into a [`Node`] plus `reportedBy`
/// edges to the policies it reports on.
///
/// Grounded on `PolicyReportResourceBuilder`/`BuildEdges` in the original
/// collector: GRC-sourced results and (for Kyverno reports) failing/erroring
/// results are kept, everything else is dropped before aggregation; edges
/// resolve each kept result's `policy` field to a `Policy` or `ClusterPolicy`
/// node by name.
#[derive(Debug, Clone)]
pub struct PolicyReportTransformer {
    node: Node,
    source_uid: graph_types::Uid,
    policies: Vec<String>,
}

impl PolicyReportTransformer {
    /// Build the node and edge-builder for `resource`.
    pub fn new(cluster_prefix: &str, kind: &str, resource: PolicyReportResource) -> Self {
        let kept: Vec<&ReportResult> = resource
            .results
            .iter()
            .filter(|r| {
                r.source == "insights"
                    || (resource.managed_by_kyverno && (r.result == "fail" || r.result == "error"))
            })
            .collect();

        let mut categories = BTreeSet::new();
        let mut policies = BTreeSet::new();
        let (mut critical, mut important, mut moderate, mut low) = (0i64, 0i64, 0i64, 0i64);
        for result in &kept {
            for category in result.category.split(',') {
                categories.insert(category.to_string());
            }
            policies.insert(result.policy.clone());
            match result.total_risk.as_str() {
                "4" => critical += 1,
                "3" => important += 1,
                "2" => moderate += 1,
                "1" => low += 1,
                _ => {}
            }
        }
        let policies: Vec<String> = policies.into_iter().collect();
        let categories: Vec<String> = categories.into_iter().collect();

        let mut node = transform_common(cluster_prefix, &resource.identity);
        node.properties.insert("kind".into(), kind.into());
        node.properties.insert("numRuleViolations".into(), (kept.len() as i64).into());
        // "rules" is kept alongside "policies" for backwards compatibility
        // with older consumers of this same field name.
        node.properties.insert("rules".into(), PropertyValue::StringList(policies.clone()));
        node.properties.insert("policies".into(), PropertyValue::StringList(policies.clone()));
        node.properties.insert("category".into(), PropertyValue::StringList(categories));
        node.properties.insert("critical".into(), critical.into());
        node.properties.insert("important".into(), important.into());
        node.properties.insert("moderate".into(), moderate.into());
        node.properties.insert("low".into(), low.into());
        node.properties.insert("scope".into(), resource.scope.into());

        let source_uid = node.uid.clone();
        Self {
            node,
            source_uid,
            policies: if resource.managed_by_kyverno { policies } else { Vec::new() },
        }
    }

    /// A pure projection of the report into the graph schema.
    pub fn build_node(&self) -> Node {
        self.node.clone()
    }
}

impl EdgeBuilder for PolicyReportTransformer {
    fn build_edges(&self, store: &dyn NodeStoreView) -> Vec<Edge> {
        // Non-Kyverno reports don't carry `reportedBy` edges: the GRC engine
        // displays policy detail elsewhere in the UI.
        let mut edges = Vec::new();
        for policy in &self.policies {
            let (kind, namespace, name) = match policy.split_once('/') {
                Some((namespace, name)) => ("Policy", namespace, name),
                None => ("ClusterPolicy", CLUSTER_SCOPE_NAMESPACE, policy.as_str()),
            };
            for dest_uid in store.by_kind_name(kind, namespace, name) {
                edges.push(Edge {
                    source_uid: self.source_uid.clone(),
                    dest_uid,
                    edge_type: REPORTED_BY_EDGE_TYPE.to_string(),
                    source_kind: self.node.kind().map(str::to_string),
                    dest_kind: Some(kind.to_string()),
                });
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ResourceIdentity {
        ResourceIdentity {
            kind: "PolicyReport".into(),
            namespace: "default".into(),
            name: "report-1".into(),
            raw_uid: "report-uid-1".into(),
            owner_uid: None,
        }
    }

    #[test]
    fn keeps_only_insights_and_kyverno_failures() {
        let resource = PolicyReportResource {
            identity: identity(),
            results: vec![
                ReportResult {
                    policy: "default/role-policy".into(),
                    category: "FIM".into(),
                    result: "pass".into(),
                    total_risk: "1".into(),
                    source: "insights".into(),
                },
                ReportResult {
                    policy: "other-policy".into(),
                    category: "FIM".into(),
                    result: "pass".into(),
                    total_risk: "1".into(),
                    source: "kyverno".into(),
                },
            ],
            managed_by_kyverno: false,
            scope: "my-cluster".into(),
        };
        let node = PolicyReportTransformer::new("local-cluster", "PolicyReport", resource).build_node();
        assert_eq!(node.properties.get("numRuleViolations"), Some(&PropertyValue::Int(1)));
    }

    #[test]
    fn kyverno_failures_produce_reported_by_edges() {
        let resource = PolicyReportResource {
            identity: identity(),
            results: vec![ReportResult {
                policy: "my-cluster-policy".into(),
                category: "FIM".into(),
                result: "fail".into(),
                total_risk: "4".into(),
                source: "kyverno".into(),
            }],
            managed_by_kyverno: true,
            scope: "my-cluster".into(),
        };
        let transformer = PolicyReportTransformer::new("local-cluster", "PolicyReport", resource);
        assert_eq!(transformer.policies, vec!["my-cluster-policy".to_string()]);
    }
}
