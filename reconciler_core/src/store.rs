use graph_types::{EdgeBuilder, Node, NodeStoreView, Uid};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// A node as held in the authoritative `currentNodes` map: its last-applied
/// state plus the edge-computation capability that came with it.
///
/// The edge-builder is retained on the *stored* entry (not just the diff
/// entry) so a later `allEdges()` call can recompute edges for every current
/// node without replaying events — see spec ยง4.D.3.
#[derive(Clone)]
pub struct StoredNode {
    pub(crate) node: Node,
    pub(crate) compute_edges: Arc<dyn EdgeBuilder>,
}

impl fmt::Debug for StoredNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredNode").field("node", &self.node).finish()
    }
}

fn index_key(node: &Node) -> Option<(String, String, String)> {
    let kind = node.kind()?;
    Some((
        kind.to_string(),
        node.namespace().unwrap_or_default().to_string(),
        node.name()?.to_string(),
    ))
}

/// The authoritative mapping of UID to current node state (spec component B).
///
/// Exposes a read-only [`NodeStoreView`] for edge-builders via [`NodeStore::view`].
/// All mutation happens through `&mut self`, which is what gives the view its
/// "consistent snapshot for the duration of one `allEdges()` call" guarantee:
/// nothing else can hold a `&mut NodeStore` while an immutable view is alive.
///
/// Backed by a `BTreeMap` rather than a `HashMap`: the Edge Resolver (§4.E)
/// iterates `nodes` to decide which builder's edge wins a first-write-wins
/// collision, so iteration order has to be deterministic across runs, not
/// just stable within one.
#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: BTreeMap<Uid, StoredNode>,
    by_kind_name: HashMap<(String, String, String), BTreeSet<Uid>>,
}

impl NodeStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the stored state for `uid`, maintaining the
    /// `by_kind_name` secondary index.
    pub fn insert(&mut self, uid: Uid, stored: StoredNode) {
        if let Some(previous) = self.nodes.get(&uid) {
            if let Some(old_key) = index_key(&previous.node) {
                if let Some(set) = self.by_kind_name.get_mut(&old_key) {
                    set.remove(&uid);
                    if set.is_empty() {
                        self.by_kind_name.remove(&old_key);
                    }
                }
            }
        }
        if let Some(new_key) = index_key(&stored.node) {
            self.by_kind_name.entry(new_key).or_default().insert(uid.clone());
        }
        self.nodes.insert(uid, stored);
    }

    /// Remove `uid`, dropping it from the secondary index too.
    pub fn remove(&mut self, uid: &Uid) -> Option<StoredNode> {
        let removed = self.nodes.remove(uid)?;
        if let Some(key) = index_key(&removed.node) {
            if let Some(set) = self.by_kind_name.get_mut(&key) {
                set.remove(uid);
                if set.is_empty() {
                    self.by_kind_name.remove(&key);
                }
            }
        }
        Some(removed)
    }

    /// True if `uid` is currently present.
    pub fn contains(&self, uid: &Uid) -> bool {
        self.nodes.contains_key(uid)
    }

    /// Borrow the node currently stored for `uid`, if any.
    pub fn get(&self, uid: &Uid) -> Option<&Node> {
        self.nodes.get(uid).map(|s| &s.node)
    }

    /// Number of nodes currently stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every stored `(uid, StoredNode)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (&Uid, &StoredNode)> {
        self.nodes.iter()
    }

    /// A read-only [`NodeStoreView`] over this store, valid for as long as
    /// `self` is not mutated.
    pub fn view(&self) -> NodeStoreRef<'_> {
        NodeStoreRef { store: self }
    }
}

/// A borrowed, read-only view over a [`NodeStore`], handed to edge-builders.
#[derive(Debug)]
pub struct NodeStoreRef<'a> {
    store: &'a NodeStore,
}

impl NodeStoreView for NodeStoreRef<'_> {
    fn lookup(&self, uid: &Uid) -> Option<Node> {
        self.store.get(uid).cloned()
    }

    fn by_kind_name(&self, kind: &str, namespace: &str, name: &str) -> BTreeSet<Uid> {
        let key = (kind.to_string(), namespace.to_string(), name.to_string());
        self.store.by_kind_name.get(&key).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_types::{NoEdges, KIND_KEY, NAME_KEY, NAMESPACE_KEY};

    fn stored(node: Node) -> StoredNode {
        StoredNode {
            node,
            compute_edges: Arc::new(NoEdges),
        }
    }

    fn node_with_identity(uid: &str, kind: &str, ns: &str, name: &str) -> Node {
        let mut n = Node::new(uid);
        n.properties.insert(KIND_KEY.into(), kind.into());
        n.properties.insert(NAMESPACE_KEY.into(), ns.into());
        n.properties.insert(NAME_KEY.into(), name.into());
        n
    }

    #[test]
    fn by_kind_name_resolves_after_insert() {
        let mut store = NodeStore::new();
        let uid = Uid::new("local-cluster/1");
        store.insert(uid.clone(), stored(node_with_identity("local-cluster/1", "Pod", "default", "web")));

        let view = store.view();
        let found = view.by_kind_name("Pod", "default", "web");
        assert_eq!(found.len(), 1);
        assert!(found.contains(&uid));
    }

    #[test]
    fn by_kind_name_forgets_on_remove() {
        let mut store = NodeStore::new();
        let uid = Uid::new("local-cluster/1");
        store.insert(uid.clone(), stored(node_with_identity("local-cluster/1", "Pod", "default", "web")));
        store.remove(&uid);

        assert!(store.view().by_kind_name("Pod", "default", "web").is_empty());
    }

    #[test]
    fn reinsert_under_new_identity_moves_the_index_entry() {
        let mut store = NodeStore::new();
        let uid = Uid::new("local-cluster/1");
        store.insert(uid.clone(), stored(node_with_identity("local-cluster/1", "Pod", "default", "web")));
        store.insert(uid.clone(), stored(node_with_identity("local-cluster/1", "Pod", "default", "web-renamed")));

        let view = store.view();
        assert!(view.by_kind_name("Pod", "default", "web").is_empty());
        assert_eq!(view.by_kind_name("Pod", "default", "web-renamed").len(), 1);
    }
}
