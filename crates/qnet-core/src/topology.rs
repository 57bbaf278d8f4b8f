//! Topology: the network's node and link structure.
//!
//! Links are undirected and stored once per unordered node pair, so the
//! cost seen from either end is the same record.

use crate::error::Result;
use crate::types::*;

/// A store of nodes and weighted undirected links.
///
/// This is a trait rather than a concrete type so the validator, the
/// snapshot codec and the manager can work against any graph backend.
pub trait TopologyStore {
    /// Insert a node with no links. Fails with `DuplicateNode`.
    fn add_node(&mut self, data: NodeData) -> Result<()>;

    /// Remove a node and every incident link. Fails with `NodeNotFound`.
    /// Returns the links that were removed with it.
    fn remove_node(&mut self, id: &NodeId) -> Result<Vec<Link>>;

    /// Insert a link between two existing nodes.
    fn add_link(&mut self, a: &NodeId, b: &NodeId, cost: f64) -> Result<Link>;

    /// Change the cost of an existing link. Returns the previous cost.
    fn modify_link(&mut self, a: &NodeId, b: &NodeId, cost: f64) -> Result<f64>;

    /// Remove a link. Returns `None` if there was no link.
    fn remove_link(&mut self, a: &NodeId, b: &NodeId) -> Option<Link>;

    /// Get node data by ID.
    fn node(&self, id: &NodeId) -> Option<&NodeData>;

    /// Whether a node with this id exists.
    fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Record a renderer-supplied position. Returns false if the node is unknown.
    fn set_position(&mut self, id: &NodeId, position: Position) -> bool;

    /// Cost of the direct link between `a` and `b`, in either direction.
    fn link_cost(&self, a: &NodeId, b: &NodeId) -> Option<f64>;

    /// All neighbors of a node with the connecting link cost.
    fn neighbors(&self, id: &NodeId) -> Vec<(NodeId, f64)>;

    /// Number of links incident to a node.
    fn degree(&self, id: &NodeId) -> usize {
        self.neighbors(id).len()
    }

    /// All nodes in insertion order.
    fn nodes(&self) -> Vec<&NodeData>;

    /// All links, sorted by canonical key.
    fn links(&self) -> Vec<Link>;

    fn node_count(&self) -> usize;

    fn link_count(&self) -> usize;

    /// Minimum total cost between two nodes, or `None` when unreachable
    /// or when either node is unknown.
    fn shortest_path_cost(&self, a: &NodeId, b: &NodeId) -> Option<f64> {
        self.shortest_path(a, b).map(|(_, cost)| cost)
    }

    /// Minimum-cost route between two nodes, endpoints included.
    fn shortest_path(&self, a: &NodeId, b: &NodeId) -> Option<(Vec<NodeId>, f64)>;

    /// Number of connected components.
    fn connected_components(&self) -> usize;

    /// Remove every node and link.
    fn clear(&mut self);
}
