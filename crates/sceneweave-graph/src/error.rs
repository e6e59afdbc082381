//! Store-level errors

use crate::ids::{EdgeId, NodeId};

/// Errors raised by [`crate::GraphStore`] primitives.
///
/// Every variant is a precondition violation: the store is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Referenced node is not in the store
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Referenced edge is not in the store
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),
}
