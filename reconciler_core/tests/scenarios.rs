use assert_matches::assert_matches;
use graph_types::{Node, NodeEvent, NoEdges, Operation, OWNER_UID_KEY};
use metric::Registry;
use reconciler_core::{DiscardReason, Reconciler, ReconcilerConfig, ReconcileOutcome};
use recon_time::Time;
use std::sync::Arc;
use transforms::{OwnerEdgeBuilder, PodResource, PodTransformer, ResourceIdentity};

fn reconciler() -> Reconciler {
    Reconciler::new(ReconcilerConfig::default(), &Registry::new())
}

fn create(uid: &str, seconds: i64) -> NodeEvent {
    NodeEvent::mutation(
        Time::from_timestamp_secs(seconds),
        Operation::Create,
        Node::new(uid),
        Arc::new(NoEdges),
    )
}

fn delete(uid: &str, seconds: i64) -> NodeEvent {
    NodeEvent::delete(Time::from_timestamp_secs(seconds), Node::new(uid))
}

#[test]
fn s1_out_of_order_delete() {
    let mut r = reconciler();
    r.apply_event(delete("X", 1000));
    let outcome = r.apply_event(create("X", 0));

    assert_matches!(outcome, ReconcileOutcome::Discarded(DiscardReason::LateMutationAfterDelete));
    assert!(!r.contains_current(&"X".into()));
    assert!(r.tombstone_time(&"X".into()).is_some());
}

#[test]
fn s2_out_of_order_add() {
    let mut r = reconciler();

    let mut fresh = Node::new("X");
    fresh.properties.insert("a".into(), 1i64.into());
    r.apply_event(NodeEvent::mutation(
        Time::from_timestamp_secs(1000),
        Operation::Create,
        fresh,
        Arc::new(NoEdges),
    ));

    let mut stale = Node::new("X");
    stale.properties.insert("stale".into(), true.into());
    r.apply_event(NodeEvent::mutation(
        Time::from_timestamp_secs(0),
        Operation::Create,
        stale,
        Arc::new(NoEdges),
    ));

    let current = r.current_node(&"X".into()).unwrap();
    assert_eq!(current.properties.get("a"), Some(&1i64.into()));
    assert!(current.properties.get("stale").is_none());
}

#[test]
fn s3_add_delete() {
    let mut r = reconciler();
    r.apply_event(create("X", 0));
    r.apply_event(delete("X", 1));

    assert!(!r.contains_current(&"X".into()));
    assert!(!r.has_pending_diff(&"X".into()));
}

#[test]
fn s4_redundant() {
    let mut r = reconciler();

    let mut initial = Node::new("X");
    initial.properties.insert("v".into(), "important".into());
    r.apply_event(NodeEvent::mutation(
        Time::from_timestamp_secs(0),
        Operation::Create,
        initial.clone(),
        Arc::new(NoEdges),
    ));
    r.diff(); // advances previousNodes to include X

    let mut repeat = Node::new("X");
    repeat.properties.insert("v".into(), "important".into());
    let outcome = r.apply_event(NodeEvent::mutation(
        Time::from_timestamp_secs(1),
        Operation::Update,
        repeat,
        Arc::new(NoEdges),
    ));

    assert_matches!(outcome, ReconcileOutcome::Discarded(DiscardReason::Redundant));
    assert!(!r.has_pending_diff(&"X".into()));
}

#[test]
fn s5_add_edges() {
    let mut r = reconciler();
    let prefix = r.cluster_prefix().to_string();

    let owner = Node::new(graph_types::Uid::prefixed(&prefix, "1234"));
    r.apply_event(NodeEvent::mutation(
        Time::from_timestamp_secs(0),
        Operation::Create,
        owner,
        Arc::new(NoEdges),
    ));

    let pod = PodTransformer::new(
        &prefix,
        PodResource {
            identity: ResourceIdentity {
                kind: "Pod".into(),
                namespace: "default".into(),
                name: "web-0".into(),
                raw_uid: "5678".into(),
                owner_uid: Some("1234".into()),
            },
            phase: "Running".into(),
            node_name: None,
            images: Vec::new(),
            host_network: false,
        },
    );
    let pod_node = pod.build_node();
    r.apply_event(NodeEvent::mutation(
        Time::from_timestamp_secs(1),
        Operation::Create,
        pod_node,
        Arc::new(pod),
    ));

    let edges = r.all_edges();
    let pod_uid = graph_types::Uid::prefixed(&prefix, "5678");
    let owner_uid = graph_types::Uid::prefixed(&prefix, "1234");

    let from_pod = &edges[&pod_uid];
    assert_eq!(from_pod.len(), 1);
    let edge = &from_pod[&owner_uid];
    assert_eq!(edge.edge_type, "ownedBy");
}

#[test]
fn s6_diff_progression() {
    let mut r = reconciler();

    // Pre-state: previousNodes has node 1234.
    r.apply_event(create("1234", 0));
    r.diff();

    // 1234 changes, 5678 is new and owned by 1234.
    let mut changed = Node::new("1234");
    changed.properties.insert("v".into(), 2i64.into());
    r.apply_event(NodeEvent::mutation(
        Time::from_timestamp_secs(1),
        Operation::Update,
        changed,
        Arc::new(NoEdges),
    ));

    let mut owned = Node::new("5678");
    owned.metadata.insert(OWNER_UID_KEY.into(), "1234".into());
    let builder = Arc::new(OwnerEdgeBuilder::for_node(&owned, "Pod"));
    r.apply_event(NodeEvent::mutation(Time::from_timestamp_secs(1), Operation::Create, owned, builder));

    let diff = r.diff();
    assert_eq!(diff.add_nodes.len(), 1);
    assert_eq!(diff.add_nodes[0].uid, "5678".into());
    assert_eq!(diff.update_nodes.len(), 1);
    assert_eq!(diff.update_nodes[0].uid, "1234".into());
    assert_eq!(diff.add_edges.len(), 1);
    assert!(diff.delete_nodes.is_empty());
    assert!(diff.delete_edges.is_empty());

    let second = r.diff();
    assert!(second.is_empty());
}

#[test]
fn diff_idempotence_with_no_intervening_events() {
    let mut r = reconciler();
    r.apply_event(create("X", 0));
    r.diff();

    let second = r.diff();
    assert!(second.is_empty());
}

#[test]
fn snapshot_completeness() {
    let mut r = reconciler();
    r.apply_event(create("a", 0));
    r.apply_event(create("b", 1));
    r.apply_event(delete("a", 2));

    let snapshot = r.complete();
    assert_eq!(snapshot.total_nodes, r.current_len());
    assert_eq!(snapshot.total_nodes, snapshot.nodes.len());
    assert_eq!(snapshot.total_edges, snapshot.edges.len());
}

#[test]
fn edge_purity_across_repeated_calls() {
    let mut r = reconciler();
    r.apply_event(create("a", 0));
    r.apply_event(create("b", 1));

    assert_eq!(r.all_edges(), r.all_edges());
}
