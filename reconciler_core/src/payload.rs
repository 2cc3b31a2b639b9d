use graph_types::{Edge, Node, Uid};

/// The change set since the last baseline advance (the last `Diff`/`Complete`
/// call), produced by [`crate::Reconciler::diff`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diff {
    /// Nodes that did not exist in the previous baseline.
    pub add_nodes: Vec<Node>,
    /// Nodes that existed in the previous baseline with different state.
    pub update_nodes: Vec<Node>,
    /// UIDs deleted since the previous baseline.
    pub delete_nodes: Vec<Uid>,
    /// Edges present now that weren't present at the previous baseline.
    pub add_edges: Vec<Edge>,
    /// Edges present at the previous baseline that are gone now.
    pub delete_edges: Vec<Edge>,
}

impl Diff {
    /// True if this diff carries no changes at all. Two back-to-back calls
    /// to `Diff()` with no intervening events must produce an empty second
    /// diff (spec invariant 5 / testable property 5).
    pub fn is_empty(&self) -> bool {
        self.add_nodes.is_empty()
            && self.update_nodes.is_empty()
            && self.delete_nodes.is_empty()
            && self.add_edges.is_empty()
            && self.delete_edges.is_empty()
    }
}

/// The full current graph state, produced by [`crate::Reconciler::complete`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Every currently live node.
    pub nodes: Vec<Node>,
    /// Every currently derivable edge.
    pub edges: Vec<Edge>,
    /// `nodes.len()`, carried explicitly so the sender doesn't need to count.
    pub total_nodes: usize,
    /// `edges.len()`, carried explicitly so the sender doesn't need to count.
    pub total_edges: usize,
}
