//! Explicit editor state bundle
//!
//! Everything an operation needs travels in one [`GraphContext`] passed by
//! reference. No globals; tests construct a fresh context each.

use sceneweave_graph::{GraphSnapshot, GraphStore};
use sceneweave_history::History;
use sceneweave_rules::{NodeCatalog, RuleEngine};

/// The store, rule table, and history an editing session operates on.
#[derive(Debug)]
pub struct GraphContext {
    pub store: GraphStore,
    pub rules: RuleEngine,
    pub history: History,
}

impl Default for GraphContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphContext {
    /// Empty context over the built-in rule table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: GraphStore::new(),
            rules: RuleEngine::with_defaults(),
            history: History::new(),
        }
    }

    /// Context over an explicit catalog.
    #[must_use]
    pub fn with_catalog(catalog: NodeCatalog) -> Self {
        Self {
            rules: RuleEngine::new(catalog),
            ..Self::new()
        }
    }

    /// Replace the graph with a document and restart history from it.
    pub fn load(&mut self, document: &GraphSnapshot) {
        self.store.restore(document);
        self.history.clear();
        self.history.push(document);
    }

    /// Record the current graph state as one committed edit.
    pub fn commit(&mut self) {
        self.history.push(&self.store.snapshot());
    }

    /// Step the graph back one committed state.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.store.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    /// Step the graph forward one committed state.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.store.restore(&snapshot);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sceneweave_graph::{Node, NodeId, NodeKind, NodePayload, Position};

    fn start_node(id: &str) -> Node {
        Node::new(
            NodeId::new(id),
            NodeKind::Start,
            Position::default(),
            NodePayload::Flow {
                title: id.to_string(),
            },
        )
    }

    #[test]
    fn load_restarts_history() {
        let mut ctx = GraphContext::new();
        ctx.store.add_nodes([start_node("stale")]);
        ctx.commit();

        let document = GraphSnapshot::new(vec![start_node("fresh")], vec![]);
        ctx.load(&document);

        assert_eq!(ctx.store.node_count(), 1);
        assert!(ctx.store.contains_node(&NodeId::new("fresh")));
        assert!(!ctx.history.can_undo());
    }

    #[test]
    fn undo_redo_move_the_store() {
        let mut ctx = GraphContext::new();
        ctx.load(&GraphSnapshot::default());

        ctx.store.add_nodes([start_node("a")]);
        ctx.commit();

        assert!(ctx.undo());
        assert_eq!(ctx.store.node_count(), 0);

        assert!(ctx.redo());
        assert_eq!(ctx.store.node_count(), 1);
        assert!(!ctx.redo());
    }
}
