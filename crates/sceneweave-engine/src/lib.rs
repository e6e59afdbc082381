//! Sceneweave Engine - the editor core
//!
//! Ties the store, rules, and history together:
//! - [`GraphContext`]: explicitly constructed state bundle, passed by
//!   reference to every operation (no ambient singletons)
//! - [`NodeFactory`]: node instantiation from catalog metadata
//! - [`DescriptionManager`]: lifecycle of auxiliary description nodes,
//!   exclusive and shared, including reactive cleanup after edge removal
//! - [`EditorEngine`]: the command surface the UI drives - gate, mutate,
//!   reconcile, snapshot
//!
//! Every committed mutation leaves the graph satisfying the structural
//! invariants (acyclicity, cardinality caps, linkage consistency, no
//! orphaned description nodes) and pushes exactly one history snapshot.

#![warn(unreachable_pub)]

pub mod context;
pub mod descriptions;
pub mod editor;
pub mod error;
pub mod factory;

pub use context::GraphContext;
pub use descriptions::DescriptionManager;
pub use editor::EditorEngine;
pub use error::{CatalogError, EngineError, LifecycleError};
pub use factory::NodeFactory;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the editor core
    pub use crate::{DescriptionManager, EditorEngine, EngineError, GraphContext, NodeFactory};
    pub use sceneweave_graph::{
        Edge, EdgeId, GraphSnapshot, GraphStore, Handle, Node, NodeId, NodeKind, Position,
        SubSceneId,
    };
    pub use sceneweave_history::History;
    pub use sceneweave_rules::{NodeCatalog, ProposedConnection, RuleEngine};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
