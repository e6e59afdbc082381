//! Sceneweave Rules - connection legality
//!
//! Pure decision logic over the graph store:
//! - [`NodeCatalog`]: per-type connection rules and display metadata
//! - [`RuleEngine`]: the `can_add_edge` gate the UI calls before committing
//!   any edge, with typed denial reasons
//! - Cycle detection over structural edges (description links are a
//!   bipartite relation and never count)
//!
//! Nothing in this crate mutates the store.

#![warn(unreachable_pub)]

pub mod catalog;
pub mod engine;
pub mod traversal;

pub use catalog::{CatalogEntry, DuplicateScope, NodeCatalog, NodeDisplay, NodeSize, TypeRules};
pub use engine::{ProposedConnection, RuleEngine, RuleViolation};
pub use traversal::{is_structural_edge, would_create_cycle};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
