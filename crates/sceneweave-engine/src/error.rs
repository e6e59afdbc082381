//! Error types for the editor core

use sceneweave_graph::{GraphError, NodeId, NodeKind};
use sceneweave_rules::RuleViolation;

/// Catalog lookups that fail during node instantiation.
///
/// Instantiating an unregistered type is a programming error, not a user
/// action; callers may treat it as fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No entry registered for this kind
    #[error("node type {0} is not registered")]
    UnknownType(NodeKind),
}

/// Precondition failures in the description lifecycle.
///
/// All of these leave the graph untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// Referenced scene node is not in the graph
    #[error("scene node not found: {0}")]
    SceneMissing(NodeId),

    /// Referenced node exists but is not a scene node
    #[error("node {0} is not a scene node")]
    NotAScene(NodeId),

    /// Sub-scene index past the end of the scene's list
    #[error("sub-scene index {index} out of range for scene {scene}")]
    SubSceneOutOfRange { scene: NodeId, index: usize },

    /// Shared generation requires at least one sub-scene
    #[error("scene {0} has no sub-scenes")]
    NoSubScenes(NodeId),

    /// Referenced description node is not in the graph
    #[error("description node not found: {0}")]
    DescriptionMissing(NodeId),
}

/// Top-level error for editor commands.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// The rule engine denied the connection
    #[error("connection denied: {0}")]
    Denied(#[from] RuleViolation),

    /// Description lifecycle precondition failed
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Node instantiation hit an unregistered type
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Store primitive failed
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl EngineError {
    /// Whether this error is a denial the UI should surface, as opposed to
    /// a programming error.
    #[inline]
    #[must_use]
    pub fn is_denial(&self) -> bool {
        matches!(self, Self::Denied(_))
    }
}
