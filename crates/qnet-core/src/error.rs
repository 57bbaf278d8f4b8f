//! Error types for topology operations.
//!
//! Every error is local and recoverable: a failed operation leaves the
//! store exactly as it was.

use crate::types::NodeId;
use thiserror::Error;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors returned by topology mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    /// A node with this id already exists.
    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    /// The node to remove does not exist.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// A link references a node that does not exist.
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// The unordered pair already has a link.
    #[error("Duplicate link: {0} <-> {1}")]
    DuplicateLink(NodeId, NodeId),

    /// The unordered pair has no link.
    #[error("Link not found: {0} <-> {1}")]
    LinkNotFound(NodeId, NodeId),

    /// Costs must be finite and non-negative.
    #[error("Invalid cost: {0} (must be finite and >= 0)")]
    InvalidCost(f64),

    /// A link cannot join a node to itself.
    #[error("Self link on node: {0}")]
    SelfLink(NodeId),
}

impl TopologyError {
    pub fn duplicate_link(a: &NodeId, b: &NodeId) -> Self {
        TopologyError::DuplicateLink(a.clone(), b.clone())
    }

    pub fn link_not_found(a: &NodeId, b: &NodeId) -> Self {
        TopologyError::LinkNotFound(a.clone(), b.clone())
    }
}
