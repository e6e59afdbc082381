//! The mutable graph store
//!
//! Single shared resource for all editor components. Mutation and query
//! primitives only; connection rules and description-link upkeep live in
//! the rules and engine crates. Interior lock serializes mutations through
//! one owner, so callers compose multi-step operations without the graph
//! shifting underneath a traversal.

use crate::edge::Edge;
use crate::error::GraphError;
use crate::ids::{EdgeId, Handle, NodeId};
use crate::node::Node;
use crate::snapshot::GraphSnapshot;
use indexmap::IndexMap;
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct StoreInner {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
}

/// Mutable node/edge collection with insertion-ordered iteration.
///
/// Reads hand out owned clones; no reference escapes the lock.
#[derive(Debug, Default)]
pub struct GraphStore {
    inner: RwLock<StoreInner>,
}

impl GraphStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated from a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        let store = Self::new();
        store.restore(snapshot);
        store
    }

    /// Insert nodes. An existing node with the same id is replaced.
    pub fn add_nodes(&self, nodes: impl IntoIterator<Item = Node>) {
        let mut inner = self.inner.write();
        for node in nodes {
            inner.nodes.insert(node.id.clone(), node);
        }
    }

    /// Remove nodes along with their incident edges.
    ///
    /// Returns the removed incident edges so callers can reconcile
    /// description links with endpoint data captured before removal.
    pub fn remove_nodes(&self, ids: &[NodeId]) -> Vec<Edge> {
        let mut inner = self.inner.write();
        for id in ids {
            inner.nodes.shift_remove(id);
        }

        let dropped: Vec<EdgeId> = inner
            .edges
            .values()
            .filter(|e| ids.contains(&e.source) || ids.contains(&e.target))
            .map(|e| e.id.clone())
            .collect();

        dropped
            .iter()
            .filter_map(|id| inner.edges.shift_remove(id))
            .collect()
    }

    /// Insert edges. An existing edge with the same id is replaced.
    pub fn add_edges(&self, edges: impl IntoIterator<Item = Edge>) {
        let mut inner = self.inner.write();
        for edge in edges {
            inner.edges.insert(edge.id.clone(), edge);
        }
    }

    /// Remove edges by id, returning the removed values.
    ///
    /// Ids not present are skipped; partial batches are not an error.
    pub fn remove_edges(&self, ids: &[EdgeId]) -> Vec<Edge> {
        let mut inner = self.inner.write();
        ids.iter()
            .filter_map(|id| inner.edges.shift_remove(id))
            .collect()
    }

    /// Clone out a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<Node> {
        self.inner.read().nodes.get(id).cloned()
    }

    /// Clone out an edge by id.
    #[must_use]
    pub fn edge(&self, id: &EdgeId) -> Option<Edge> {
        self.inner.read().edges.get(id).cloned()
    }

    /// Whether a node exists.
    #[must_use]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.inner.read().nodes.contains_key(id)
    }

    /// Mutate a node in place.
    pub fn update_node(
        &self,
        id: &NodeId,
        f: impl FnOnce(&mut Node),
    ) -> Result<(), GraphError> {
        let mut inner = self.inner.write();
        match inner.nodes.get_mut(id) {
            Some(node) => {
                f(node);
                Ok(())
            }
            None => Err(GraphError::NodeNotFound(id.clone())),
        }
    }

    /// All nodes, insertion order.
    #[must_use]
    pub fn nodes(&self) -> Vec<Node> {
        self.inner.read().nodes.values().cloned().collect()
    }

    /// All edges, insertion order.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        self.inner.read().edges.values().cloned().collect()
    }

    /// Edges whose source is the given node.
    #[must_use]
    pub fn edges_from(&self, source: &NodeId) -> Vec<Edge> {
        self.find_edges(|e| &e.source == source)
    }

    /// Edges whose target is the given node.
    #[must_use]
    pub fn edges_into(&self, target: &NodeId) -> Vec<Edge> {
        self.find_edges(|e| &e.target == target)
    }

    /// Edges matching an arbitrary predicate.
    #[must_use]
    pub fn find_edges(&self, pred: impl Fn(&Edge) -> bool) -> Vec<Edge> {
        self.inner
            .read()
            .edges
            .values()
            .filter(|e| pred(e))
            .cloned()
            .collect()
    }

    /// Count edges sharing this exact `(source, source_handle)` pair.
    #[must_use]
    pub fn outgoing_count(&self, source: &NodeId, handle: Option<&Handle>) -> usize {
        self.inner
            .read()
            .edges
            .values()
            .filter(|e| &e.source == source && e.source_handle.as_ref() == handle)
            .count()
    }

    /// Count edges sharing this exact `(target, target_handle)` pair.
    #[must_use]
    pub fn incoming_count(&self, target: &NodeId, handle: Option<&Handle>) -> usize {
        self.inner
            .read()
            .edges
            .values()
            .filter(|e| &e.target == target && e.target_handle.as_ref() == handle)
            .count()
    }

    /// Count all edges into a node, any handle.
    #[must_use]
    pub fn incoming_total(&self, target: &NodeId) -> usize {
        self.inner
            .read()
            .edges
            .values()
            .filter(|e| &e.target == target)
            .count()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.read().nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.read().edges.len()
    }

    /// Whether the store holds neither nodes nor edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let inner = self.inner.read();
        inner.nodes.is_empty() && inner.edges.is_empty()
    }

    /// Deep-copy the full graph state.
    #[must_use]
    pub fn snapshot(&self) -> GraphSnapshot {
        let inner = self.inner.read();
        GraphSnapshot {
            nodes: inner.nodes.values().cloned().collect(),
            edges: inner.edges.values().cloned().collect(),
        }
    }

    /// Replace the full graph state with a snapshot's contents.
    pub fn restore(&self, snapshot: &GraphSnapshot) {
        let mut inner = self.inner.write();
        inner.nodes = snapshot
            .nodes
            .iter()
            .map(|n| (n.id.clone(), n.clone()))
            .collect();
        inner.edges = snapshot
            .edges
            .iter()
            .map(|e| (e.id.clone(), e.clone()))
            .collect();
    }

    /// Drop everything.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.nodes.clear();
        inner.edges.clear();
    }
}
