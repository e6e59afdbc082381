//! Sceneweave Graph - store and data model
//!
//! The mutable node/edge collection underneath the editor core:
//! - Typed nodes (start/end/scene/guide/description) with positional and
//!   payload data
//! - Directed edges with optional named handles on either endpoint
//! - [`GraphStore`]: the single shared mutable resource, mutation and query
//!   primitives only — no connection rules, no lifecycle logic
//! - [`GraphSnapshot`]: owned deep copies for history/undo
//!
//! All higher-level semantics (rule gating, description-link upkeep,
//! undo/redo) live in the sibling crates and are expressed purely in terms
//! of the primitives exported here.

#![warn(unreachable_pub)]

pub mod edge;
pub mod error;
pub mod ids;
pub mod node;
pub mod snapshot;
pub mod store;

pub use edge::{DescriptionLink, Edge, EdgeStyle};
pub use error::GraphError;
pub use ids::{EdgeId, Handle, NodeId, SubSceneId};
pub use node::{DescriptionData, Node, NodeKind, NodePayload, Position, SceneData, SubScene};
pub use snapshot::GraphSnapshot;
pub use store::GraphStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
