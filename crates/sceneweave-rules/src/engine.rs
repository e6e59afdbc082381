//! Connection rule engine
//!
//! Gate for every edge the UI wants to commit. Checks run in a fixed order
//! and short-circuit on the first failure; the graph is never mutated here.

use crate::catalog::{DuplicateScope, NodeCatalog, TypeRules};
use crate::traversal::would_create_cycle;
use sceneweave_graph::{GraphStore, Handle, NodeId, NodeKind, SubSceneId};
use tracing::warn;

/// A connection the UI proposes to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedConnection {
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: Option<Handle>,
    pub target_handle: Option<Handle>,
}

impl ProposedConnection {
    /// Handleless connection between two nodes.
    #[must_use]
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    /// Set the source handle.
    #[must_use]
    pub fn from_handle(mut self, handle: Handle) -> Self {
        self.source_handle = Some(handle);
        self
    }

    /// Set the target handle.
    #[must_use]
    pub fn to_handle(mut self, handle: Handle) -> Self {
        self.target_handle = Some(handle);
        self
    }
}

/// Why a proposed connection was denied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    /// Node attempted to connect to itself
    #[error("node {0} may not connect to itself")]
    SelfConnection(NodeId),

    /// Source endpoint is not in the graph
    #[error("source node not found: {0}")]
    SourceMissing(NodeId),

    /// Target endpoint is not in the graph
    #[error("target node not found: {0}")]
    TargetMissing(NodeId),

    /// Source kind has no catalog entry
    #[error("no catalog entry for node type {0}")]
    UnknownSourceType(NodeKind),

    /// An identical connection already exists
    #[error("connection from {source} to {target} already exists")]
    DuplicateConnection { source: NodeId, target: NodeId },

    /// Accepting the edge would close a cycle
    #[error("connecting {source} to {target} would create a cycle")]
    WouldCreateCycle { source: NodeId, target: NodeId },

    /// Target kind is outside the source kind's allow-list
    #[error("{source_kind} nodes may not connect to {target_kind} nodes")]
    TargetKindNotAllowed {
        source_kind: NodeKind,
        target_kind: NodeKind,
    },

    /// Source handle already carries its maximum number of edges
    #[error("outgoing limit of {limit} reached on {source}")]
    OutgoingLimitReached { source: NodeId, limit: u32 },

    /// Target handle already carries its maximum number of edges
    #[error("incoming limit of {limit} reached on {target}")]
    IncomingLimitReached { target: NodeId, limit: u32 },

    /// Sub-scene is already linked to a different description node
    #[error("sub-scene {0} is already linked to another description node")]
    SubSceneAlreadyLinked(SubSceneId),

    /// Sub-scene is already linked to this exact description node
    #[error("sub-scene {0} is already linked to this description node")]
    DuplicateDescriptionLink(SubSceneId),
}

/// Decides whether proposed edges are legal. Stateless besides the catalog.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    catalog: NodeCatalog,
}

impl RuleEngine {
    /// Engine over an explicit catalog.
    #[must_use]
    pub fn new(catalog: NodeCatalog) -> Self {
        Self { catalog }
    }

    /// Engine over the built-in rule table.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(NodeCatalog::with_defaults())
    }

    /// The catalog this engine consults.
    #[must_use]
    pub fn catalog(&self) -> &NodeCatalog {
        &self.catalog
    }

    /// Mutable catalog access, for registration overrides.
    pub fn catalog_mut(&mut self) -> &mut NodeCatalog {
        &mut self.catalog
    }

    /// The boolean gate the UI calls before committing an edge.
    ///
    /// Denial reasons are surfaced through the log; callers that want the
    /// typed reason use [`Self::check`].
    #[must_use]
    pub fn can_add_edge(&self, store: &GraphStore, proposed: &ProposedConnection) -> bool {
        match self.check(store, proposed) {
            Ok(()) => true,
            Err(reason) => {
                warn!(
                    source = %proposed.source,
                    target = %proposed.target,
                    %reason,
                    "connection denied"
                );
                false
            }
        }
    }

    /// Full rule evaluation with the typed denial reason.
    ///
    /// Check order: self-connection, endpoint existence, the
    /// sub-scene-to-description special case, duplicates, cycles, target
    /// kind, outgoing cap, incoming cap. First failure wins.
    pub fn check(
        &self,
        store: &GraphStore,
        proposed: &ProposedConnection,
    ) -> Result<(), RuleViolation> {
        // 1. Self-connection.
        if proposed.source == proposed.target && !self.allows_self_connection(store, proposed) {
            return Err(RuleViolation::SelfConnection(proposed.source.clone()));
        }

        // 2. Both endpoints must exist.
        let source_node = store
            .node(&proposed.source)
            .ok_or_else(|| RuleViolation::SourceMissing(proposed.source.clone()))?;
        let target_node = store
            .node(&proposed.target)
            .ok_or_else(|| RuleViolation::TargetMissing(proposed.target.clone()))?;

        // 3. Sub-scene handle into a description node follows its own
        //    protocol instead of the generic rules.
        if let Some(sub_scene) = proposed
            .source_handle
            .as_ref()
            .and_then(Handle::as_sub_scene)
        {
            if target_node.kind == NodeKind::Description {
                return self.check_sub_scene_link(
                    store,
                    &proposed.source,
                    &sub_scene,
                    &proposed.target,
                );
            }
        }

        let rules = self
            .catalog
            .rules(source_node.kind)
            .ok_or(RuleViolation::UnknownSourceType(source_node.kind))?;

        // 4. Duplicate edge.
        if !rules.allow_duplicate_connection && self.has_duplicate(store, proposed, rules) {
            return Err(RuleViolation::DuplicateConnection {
                source: proposed.source.clone(),
                target: proposed.target.clone(),
            });
        }

        // 5. Cycle.
        if !rules.allow_cycle && would_create_cycle(store, &proposed.source, &proposed.target) {
            return Err(RuleViolation::WouldCreateCycle {
                source: proposed.source.clone(),
                target: proposed.target.clone(),
            });
        }

        // 6. Target kind allow-list.
        if let Some(allowed) = &rules.allowed_targets {
            if !allowed.contains(&target_node.kind) {
                return Err(RuleViolation::TargetKindNotAllowed {
                    source_kind: source_node.kind,
                    target_kind: target_node.kind,
                });
            }
        }

        // 7. Outgoing cardinality on the exact (source, handle) pair.
        if let Some(limit) = rules.max_outgoing {
            let current = store.outgoing_count(&proposed.source, proposed.source_handle.as_ref());
            if current as u32 >= limit {
                return Err(RuleViolation::OutgoingLimitReached {
                    source: proposed.source.clone(),
                    limit,
                });
            }
        }

        // 8. Incoming cardinality on the exact (target, handle) pair.
        if let Some(limit) = rules.max_incoming {
            let current = store.incoming_count(&proposed.target, proposed.target_handle.as_ref());
            if current as u32 >= limit {
                return Err(RuleViolation::IncomingLimitReached {
                    target: proposed.target.clone(),
                    limit,
                });
            }
        }

        Ok(())
    }

    /// Sub-scene-to-description sub-protocol.
    ///
    /// A sub-scene links to at most one description node at a time, and
    /// never twice to the same one. Exclusivity is per sub-scene, not per
    /// description node: a shared node may serve many sub-scenes.
    /// Deliberately scoped to `(source, source_handle, target)`; the
    /// target handle does not participate, unlike the generic duplicate
    /// check.
    pub fn check_sub_scene_link(
        &self,
        store: &GraphStore,
        scene: &NodeId,
        sub_scene: &SubSceneId,
        description: &NodeId,
    ) -> Result<(), RuleViolation> {
        let handle = Handle::sub_scene(sub_scene);
        let existing = store.find_edges(|e| {
            &e.source == scene && e.source_handle.as_ref() == Some(&handle)
        });

        if existing.iter().any(|e| &e.target != description) {
            return Err(RuleViolation::SubSceneAlreadyLinked(sub_scene.clone()));
        }
        if existing.iter().any(|e| &e.target == description) {
            return Err(RuleViolation::DuplicateDescriptionLink(sub_scene.clone()));
        }

        Ok(())
    }

    fn allows_self_connection(&self, store: &GraphStore, proposed: &ProposedConnection) -> bool {
        store
            .node(&proposed.source)
            .and_then(|n| self.catalog.rules(n.kind).cloned())
            .is_some_and(|r| r.allow_self_connection)
    }

    fn has_duplicate(
        &self,
        store: &GraphStore,
        proposed: &ProposedConnection,
        rules: &TypeRules,
    ) -> bool {
        let edges = match rules.duplicate_scope {
            DuplicateScope::ExactHandles => store.find_edges(|e| {
                e.source == proposed.source
                    && e.target == proposed.target
                    && e.source_handle == proposed.source_handle
                    && e.target_handle == proposed.target_handle
            }),
            DuplicateScope::NodePair => {
                store.find_edges(|e| e.source == proposed.source && e.target == proposed.target)
            }
        };
        !edges.is_empty()
    }
}
