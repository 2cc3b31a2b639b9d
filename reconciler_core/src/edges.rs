use crate::store::NodeStore;
use graph_types::{Edge, Uid};
use observability_deps::tracing::error;
use std::collections::{BTreeMap, HashMap};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Recompute every node's outgoing edges against the current node set (spec
/// component E).
///
/// Pure function of `store`: calling this twice with no intervening mutation
/// returns equal results (testable property 7). Deduplication follows spec
/// ยง4.E: within one node's own builder output, the last write for a given
/// `(source, dest)` pair wins; across different nodes' builders landing on
/// the same `(source, dest)`, the first one processed wins. Self-edges are
/// dropped. Edges pointing at a UID not currently present are kept —
/// downstream tolerates dangling references.
pub fn all_edges(store: &NodeStore) -> BTreeMap<Uid, BTreeMap<Uid, Edge>> {
    let view = store.view();
    let mut result: BTreeMap<Uid, BTreeMap<Uid, Edge>> = BTreeMap::new();

    for (uid, stored) in store.iter() {
        let built = safe_build_edges(uid, stored, &view);

        // Last write wins for duplicates produced by this one builder call.
        let mut deduped: HashMap<(Uid, Uid), Edge> = HashMap::new();
        for edge in built {
            if edge.is_self_edge() {
                continue;
            }
            deduped.insert((edge.source_uid.clone(), edge.dest_uid.clone()), edge);
        }

        for ((src, dest), edge) in deduped {
            // First write wins across different nodes' builders.
            result.entry(src).or_default().entry(dest).or_insert(edge);
        }
    }

    result
}

/// Flatten the nested `source -> dest -> edge` map produced by [`all_edges`]
/// into a flat list, as needed by the diff/snapshot payloads.
pub fn flatten(edges: &BTreeMap<Uid, BTreeMap<Uid, Edge>>) -> Vec<Edge> {
    edges.values().flat_map(|dests| dests.values().cloned()).collect()
}

fn safe_build_edges(
    uid: &Uid,
    stored: &crate::store::StoredNode,
    view: &dyn graph_types::NodeStoreView,
) -> Vec<Edge> {
    match catch_unwind(AssertUnwindSafe(|| stored.compute_edges.build_edges(view))) {
        Ok(edges) => edges,
        Err(_) => {
            error!(%uid, "edge builder panicked; node contributes no edges for this resolution");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_types::{EdgeBuilder, Node, NodeStoreView};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Fixed(Vec<Edge>);
    impl EdgeBuilder for Fixed {
        fn build_edges(&self, _store: &dyn NodeStoreView) -> Vec<Edge> {
            self.0.clone()
        }
    }

    #[derive(Debug)]
    struct Panics;
    impl EdgeBuilder for Panics {
        fn build_edges(&self, _store: &dyn NodeStoreView) -> Vec<Edge> {
            panic!("boom")
        }
    }

    fn insert(store: &mut NodeStore, uid: &str, builder: Arc<dyn EdgeBuilder>) {
        store.insert(
            Uid::new(uid),
            crate::store::StoredNode {
                node: Node::new(uid),
                compute_edges: builder,
            },
        );
    }

    #[test]
    fn drops_self_edges() {
        let mut store = NodeStore::new();
        insert(&mut store, "a", Arc::new(Fixed(vec![Edge::new("a", "a", "selfLoop")])));
        assert!(all_edges(&store).get(&Uid::new("a")).map_or(true, |m| m.is_empty()));
    }

    #[test]
    fn dedups_last_write_wins_within_one_builder() {
        let mut store = NodeStore::new();
        insert(
            &mut store,
            "a",
            Arc::new(Fixed(vec![
                Edge::new("a", "b", "first"),
                Edge::new("a", "b", "second"),
            ])),
        );
        let edges = all_edges(&store);
        let edge = edges[&Uid::new("a")][&Uid::new("b")].clone();
        assert_eq!(edge.edge_type, "second");
    }

    #[test]
    fn keeps_dangling_edges() {
        let mut store = NodeStore::new();
        insert(&mut store, "a", Arc::new(Fixed(vec![Edge::new("a", "missing", "refersTo")])));
        let edges = all_edges(&store);
        assert!(edges[&Uid::new("a")].contains_key(&Uid::new("missing")));
    }

    #[test]
    fn edge_builder_fault_is_contained_per_node() {
        let mut store = NodeStore::new();
        insert(&mut store, "a", Arc::new(Panics));
        insert(&mut store, "b", Arc::new(Fixed(vec![Edge::new("b", "c", "ok")])));

        let edges = all_edges(&store);
        assert!(edges.get(&Uid::new("a")).map_or(true, |m| m.is_empty()));
        assert_eq!(edges[&Uid::new("b")][&Uid::new("c")].edge_type, "ok");
    }

    #[test]
    fn pure_and_idempotent() {
        let mut store = NodeStore::new();
        insert(&mut store, "a", Arc::new(Fixed(vec![Edge::new("a", "b", "x")])));
        assert_eq!(all_edges(&store), all_edges(&store));
    }
}
