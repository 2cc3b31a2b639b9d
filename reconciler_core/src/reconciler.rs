use crate::config::ReconcilerConfig;
use crate::edges;
use crate::error::{DiscardReason, ReconcileOutcome};
use crate::metrics::ReconcilerMetrics;
use crate::payload::{Diff, Snapshot};
use crate::store::{NodeStore, StoredNode};
use crate::tombstones::TombstoneCache;
use graph_types::{Edge, Node, NodeEvent, Operation, Uid};
use metric::Registry;
use observability_deps::tracing::{trace, warn};
use recon_time::Time;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// The reconciliation loop's owned state (spec ยง4.D, "the heart").
///
/// Every mutating method takes `&mut self`, which is what makes the "strictly
/// single-threaded" concurrency model in spec ยง5 free: there is no lock to
/// take because the borrow checker already forbids a second mutator from
/// running concurrently with this one. [`crate::ReconcilerActor`] is the thin
/// async wrapper that gives a single task exclusive ownership of a
/// `Reconciler` and channels all events, `Diff`, and `Complete` requests
/// through it.
#[derive(Debug)]
pub struct Reconciler {
    config: ReconcilerConfig,
    current: NodeStore,
    previous_nodes: HashMap<Uid, Node>,
    previous_edges: BTreeSet<Edge>,
    diff_nodes: BTreeMap<Uid, NodeEvent>,
    tombstones: TombstoneCache,
    metrics: ReconcilerMetrics,
}

impl Reconciler {
    /// Build a fresh reconciler with empty state.
    pub fn new(config: ReconcilerConfig, registry: &Registry) -> Self {
        let tombstones = TombstoneCache::new(config.tombstone_cache_capacity);
        let metrics = ReconcilerMetrics::new(registry);
        Self {
            config,
            current: NodeStore::new(),
            previous_nodes: HashMap::new(),
            previous_edges: BTreeSet::new(),
            diff_nodes: BTreeMap::new(),
            tombstones,
            metrics,
        }
    }

    /// The configured cluster prefix, for transformers building UIDs.
    pub fn cluster_prefix(&self) -> &str {
        &self.config.cluster_prefix
    }

    /// Apply one event to the current/diff/tombstone state, per the ordering
    /// rules in spec ยง4.D. This is the synchronous core of `ReconcileOne()`.
    pub fn apply_event(&mut self, event: NodeEvent) -> ReconcileOutcome {
        if event.is_malformed() {
            warn!(operation = ?event.operation, "discarding malformed event: missing uid");
            let outcome = ReconcileOutcome::Discarded(DiscardReason::MalformedEvent);
            self.metrics.record_outcome(outcome);
            return outcome;
        }

        let uid = event.node.uid.clone();
        let outcome = self.apply_checked(uid, event);
        self.metrics.record_outcome(outcome);
        outcome
    }

    fn apply_checked(&mut self, uid: Uid, event: NodeEvent) -> ReconcileOutcome {
        // 1. Tombstone guard.
        if let Some(deleted_at) = self.tombstones.get(&uid) {
            match event.operation {
                Operation::Delete => {
                    if event.time <= deleted_at {
                        trace!(%uid, "discarding stale delete");
                        return ReconcileOutcome::Discarded(DiscardReason::StaleDelete);
                    }
                    self.tombstones.put(uid, event.time);
                    return ReconcileOutcome::TombstoneRefreshed;
                }
                Operation::Create | Operation::Update => {
                    if event.time <= deleted_at {
                        trace!(%uid, "discarding late mutation for tombstoned uid");
                        return ReconcileOutcome::Discarded(DiscardReason::LateMutationAfterDelete);
                    }
                    self.tombstones.remove(&uid);
                    // Falls through to the current-state guard below: this
                    // UID is resurrected.
                }
            }
        }

        // 2. Current-state guard.
        match event.operation {
            Operation::Delete => self.apply_delete(uid, event.time),
            Operation::Create | Operation::Update => self.apply_mutation(uid, event),
        }
    }

    fn apply_delete(&mut self, uid: Uid, time: Time) -> ReconcileOutcome {
        let existed = self.current.contains(&uid) || self.previous_nodes.contains_key(&uid);
        if existed {
            self.diff_nodes.insert(
                uid.clone(),
                NodeEvent::delete(time, Node::new(uid.clone())),
            );
            self.current.remove(&uid);
        }
        self.tombstones.put(uid, time);
        if existed {
            ReconcileOutcome::Applied
        } else {
            ReconcileOutcome::DefensiveTombstone
        }
    }

    fn apply_mutation(&mut self, uid: Uid, event: NodeEvent) -> ReconcileOutcome {
        let prior_time = self.diff_nodes.get(&uid).map(|e| e.time);
        if let Some(prior_time) = prior_time {
            if event.time <= prior_time {
                trace!(%uid, "discarding out-of-order mutation");
                return ReconcileOutcome::Discarded(DiscardReason::LateMutation);
            }
        }

        // Redundancy is checked against the last-diffed baseline only (not
        // against `currentNodes`) -- see DESIGN.md for why.
        let is_redundant = prior_time.is_none()
            && self
                .previous_nodes
                .get(&uid)
                .is_some_and(|prev| prev.structurally_equal(&event.node));
        if is_redundant {
            trace!(%uid, "discarding redundant mutation");
            return ReconcileOutcome::Discarded(DiscardReason::Redundant);
        }

        // `NodeEvent::mutation` is the only way to construct a Create/Update
        // event, and it always sets `compute_edges`, so this is always `Some`.
        let compute_edges = event.compute_edges().expect("Create/Update always carries an edge builder").clone();
        self.current.insert(
            uid.clone(),
            StoredNode {
                node: event.node.clone(),
                compute_edges,
            },
        );
        self.diff_nodes.insert(uid, event);
        ReconcileOutcome::Applied
    }

    /// Recompute every node's outgoing edges against the current node set
    /// (spec component E / ยง4.E).
    pub fn all_edges(&self) -> BTreeMap<Uid, BTreeMap<Uid, Edge>> {
        edges::all_edges(&self.current)
    }

    /// Compute the change set since the last baseline advance and advance the
    /// baseline (spec component F / ยง4.F).
    pub fn diff(&mut self) -> Diff {
        self.metrics.record_diff();

        let mut add_nodes = Vec::new();
        let mut update_nodes = Vec::new();
        let mut delete_nodes = Vec::new();

        for (uid, event) in std::mem::take(&mut self.diff_nodes) {
            match event.operation {
                Operation::Delete => delete_nodes.push(uid),
                Operation::Create | Operation::Update => {
                    if self.previous_nodes.contains_key(&uid) {
                        update_nodes.push(event.node);
                    } else {
                        add_nodes.push(event.node);
                    }
                }
            }
        }

        let now_edges_nested = self.all_edges();
        let now_edges: BTreeSet<Edge> = edges::flatten(&now_edges_nested).into_iter().collect();
        let add_edges = now_edges.difference(&self.previous_edges).cloned().collect();
        let delete_edges = self.previous_edges.difference(&now_edges).cloned().collect();

        self.advance_baseline(now_edges);

        Diff {
            add_nodes,
            update_nodes,
            delete_nodes,
            add_edges,
            delete_edges,
        }
    }

    /// Emit the full current graph state and advance the diff baseline
    /// identically to [`Reconciler::diff`] (spec component G / ยง4.G).
    pub fn complete(&mut self) -> Snapshot {
        self.metrics.record_complete();

        let now_edges_nested = self.all_edges();
        let edges = edges::flatten(&now_edges_nested);
        let nodes: Vec<Node> = self.current.iter().map(|(_, stored)| stored.node.clone()).collect();
        let total_nodes = nodes.len();
        let total_edges = edges.len();

        self.advance_baseline(edges.iter().cloned().collect());
        self.diff_nodes.clear();

        Snapshot {
            nodes,
            edges,
            total_nodes,
            total_edges,
        }
    }

    fn advance_baseline(&mut self, now_edges: BTreeSet<Edge>) {
        self.previous_nodes = self
            .current
            .iter()
            .map(|(uid, stored)| (uid.clone(), stored.node.clone()))
            .collect();
        self.previous_edges = now_edges;
    }

    /// True if `uid` is present in the authoritative current node set.
    pub fn contains_current(&self, uid: &Uid) -> bool {
        self.current.contains(uid)
    }

    /// Borrow the current state of `uid`, if present.
    pub fn current_node(&self, uid: &Uid) -> Option<&Node> {
        self.current.get(uid)
    }

    /// True if `uid` is present in the last-diffed baseline.
    pub fn contains_previous(&self, uid: &Uid) -> bool {
        self.previous_nodes.contains_key(uid)
    }

    /// True if `uid` has a pending (not-yet-diffed) change.
    pub fn has_pending_diff(&self, uid: &Uid) -> bool {
        self.diff_nodes.contains_key(uid)
    }

    /// Number of nodes with a pending (not-yet-diffed) change.
    pub fn pending_diff_len(&self) -> usize {
        self.diff_nodes.len()
    }

    /// The tombstone time recorded for `uid`, if any. Note this counts as an
    /// access for the tombstone cache's LRU ordering, matching `Get`'s
    /// semantics elsewhere in the reconciler.
    pub fn tombstone_time(&mut self, uid: &Uid) -> Option<Time> {
        self.tombstones.get(uid)
    }

    /// Number of currently live nodes.
    pub fn current_len(&self) -> usize {
        self.current.len()
    }
}
