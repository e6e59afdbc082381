//! Graph snapshots for undo/redo

use crate::edge::Edge;
use crate::node::Node;
use serde::{Deserialize, Serialize};

/// An owned deep copy of the full graph state.
///
/// Snapshots never alias live store data: restoring one and then mutating
/// the store leaves the snapshot untouched, and vice versa.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// Snapshot of explicit node/edge lists.
    #[must_use]
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Number of nodes captured.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges captured.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
