//! Editor command surface
//!
//! The operations a UI wires its handlers to. Each command runs the full
//! pipeline - rule gate, store mutation, reactive reconcile, orphan
//! deletion - and pushes exactly one history snapshot when it committed
//! anything. Denials and precondition failures leave the graph (and the
//! history) untouched.

use crate::context::GraphContext;
use crate::descriptions::DescriptionManager;
use crate::error::EngineError;
use crate::factory::NodeFactory;
use sceneweave_graph::{
    Edge, EdgeId, GraphSnapshot, Handle, NodeId, NodeKind, Position,
};
use sceneweave_rules::ProposedConnection;
use tracing::info;

/// Drives a [`GraphContext`] through committed edits.
#[derive(Debug, Default)]
pub struct EditorEngine {
    context: GraphContext,
}

impl EditorEngine {
    /// Engine over a fresh default context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            context: GraphContext::new(),
        }
    }

    /// Engine over an explicit context.
    #[must_use]
    pub fn with_context(context: GraphContext) -> Self {
        Self { context }
    }

    /// Engine seeded from a document.
    #[must_use]
    pub fn from_document(document: &GraphSnapshot) -> Self {
        let mut engine = Self::new();
        engine.context.load(document);
        engine
    }

    /// The underlying context.
    #[must_use]
    pub fn context(&self) -> &GraphContext {
        &self.context
    }

    /// Mutable context access.
    pub fn context_mut(&mut self) -> &mut GraphContext {
        &mut self.context
    }

    /// Place a new node of `kind` at `position`.
    pub fn add_node(&mut self, kind: NodeKind, position: Position) -> Result<NodeId, EngineError> {
        let factory = NodeFactory::new(self.context.rules.catalog());
        let node = factory.create(kind, position)?;
        let id = node.id.clone();

        self.context.store.add_nodes([node]);
        self.context.commit();
        info!(node = %id, %kind, "added node");
        Ok(id)
    }

    /// Commit a connection the user drew.
    ///
    /// Runs the rule gate first; a denial is returned without mutation.
    /// Sub-scene-to-description connections also update the linkage fields
    /// so the graph stays consistent.
    pub fn connect(&mut self, proposed: &ProposedConnection) -> Result<EdgeId, EngineError> {
        self.context.rules.check(&self.context.store, proposed)?;

        let sub_scene = proposed
            .source_handle
            .as_ref()
            .and_then(Handle::as_sub_scene);
        let target_kind = self.context.store.node(&proposed.target).map(|n| n.kind);

        let edge_id = match (sub_scene, target_kind) {
            (Some(sub), Some(NodeKind::Description)) => {
                let manager = DescriptionManager::new(&self.context.store);
                manager.attach_sub_scene(&proposed.source, &sub, &proposed.target)?
            }
            _ => {
                let edge = Edge::with_handles(
                    proposed.source.clone(),
                    proposed.source_handle.clone(),
                    proposed.target.clone(),
                    proposed.target_handle.clone(),
                );
                let id = edge.id.clone();
                self.context.store.add_edges([edge]);
                id
            }
        };

        self.context.commit();
        info!(source = %proposed.source, target = %proposed.target, "connected");
        Ok(edge_id)
    }

    /// Remove edges, reconciling description links and collecting orphans.
    ///
    /// Returns the number of edges actually removed; unknown ids are
    /// skipped. Nothing removed means nothing committed.
    pub fn remove_edges(&mut self, ids: &[EdgeId]) -> usize {
        // Capture endpoint data through removal so reconcile can resolve
        // edges that are no longer live.
        let removed = self.context.store.remove_edges(ids);
        if removed.is_empty() {
            return 0;
        }

        self.reconcile_and_collect(&removed);
        self.context.commit();
        removed.len()
    }

    /// Remove nodes, cascading to their incident edges.
    ///
    /// Incident edges come out first, while both endpoints are still live,
    /// so the reconcile pass can resolve scene and description nodes; the
    /// nodes themselves go second.
    pub fn remove_nodes(&mut self, ids: &[NodeId]) -> usize {
        let known: Vec<NodeId> = ids
            .iter()
            .filter(|id| self.context.store.contains_node(id))
            .cloned()
            .collect();
        if known.is_empty() {
            return 0;
        }

        let incident: Vec<EdgeId> = self
            .context
            .store
            .find_edges(|e| known.contains(&e.source) || known.contains(&e.target))
            .into_iter()
            .map(|e| e.id)
            .collect();
        let dropped_edges = self.context.store.remove_edges(&incident);
        self.reconcile_and_collect(&dropped_edges);

        self.context.store.remove_nodes(&known);
        self.context.commit();
        info!(nodes = known.len(), edges = dropped_edges.len(), "removed nodes");
        known.len()
    }

    /// Create an exclusive description node for one sub-scene.
    pub fn generate_exclusive(
        &mut self,
        scene: &NodeId,
        sub_scene_index: usize,
    ) -> Result<NodeId, EngineError> {
        let node = DescriptionManager::new(&self.context.store)
            .generate_exclusive(scene, sub_scene_index)?;
        self.context.commit();
        Ok(node.id)
    }

    /// Create a shared description node for a whole scene.
    pub fn generate_shared(&mut self, scene: &NodeId) -> Result<NodeId, EngineError> {
        let node = DescriptionManager::new(&self.context.store).generate_shared(scene)?;
        self.context.commit();
        Ok(node.id)
    }

    /// Remove one sub-scene's description link.
    pub fn remove_exclusive(
        &mut self,
        scene: &NodeId,
        sub_scene_index: usize,
    ) -> Result<bool, EngineError> {
        let removed = DescriptionManager::new(&self.context.store)
            .remove_exclusive(scene, sub_scene_index)?;
        if removed {
            self.context.commit();
        }
        Ok(removed)
    }

    /// Remove a scene's shared description node.
    pub fn remove_shared(&mut self, scene: &NodeId) -> Result<bool, EngineError> {
        let removed = DescriptionManager::new(&self.context.store).remove_shared(scene)?;
        if removed {
            self.context.commit();
        }
        Ok(removed)
    }

    /// Undo the last committed edit.
    pub fn undo(&mut self) -> bool {
        self.context.undo()
    }

    /// Redo the next committed edit.
    pub fn redo(&mut self) -> bool {
        self.context.redo()
    }

    // Reconcile a batch of removed edges, then delete whatever orphans the
    // batch produced. Deletion happens only after the whole batch resolved.
    fn reconcile_and_collect(&mut self, removed: &[Edge]) {
        let orphans =
            DescriptionManager::new(&self.context.store).reconcile_removed_edges(removed);
        let orphans: Vec<NodeId> = orphans
            .into_iter()
            .filter(|id| self.context.store.contains_node(id))
            .collect();
        if !orphans.is_empty() {
            self.context.store.remove_nodes(&orphans);
            info!(count = orphans.len(), "deleted orphaned description nodes");
        }
    }
}
