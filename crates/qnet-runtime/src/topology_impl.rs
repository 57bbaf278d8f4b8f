//! Concrete implementation of the TopologyStore trait using petgraph.
//!
//! Each undirected link is a single petgraph edge, so the cost is shared
//! by both directions. A HashMap index gives O(1) node lookup by ID, and
//! an insertion-ordered id list keeps shortest-path tie breaking
//! reproducible across runs.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::Undirected;
use qnet_core::error::{Result, TopologyError};
use qnet_core::topology::TopologyStore;
use qnet_core::types::*;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Petgraph-backed implementation of the topology store.
#[derive(Debug, Clone)]
pub struct PetTopologyStore {
    graph: StableGraph<NodeData, f64, Undirected>,
    /// Map from our NodeId to petgraph's internal index.
    node_index: HashMap<NodeId, NodeIndex>,
    /// Node ids in insertion order. StableGraph reuses freed slots, so
    /// index order is not insertion order.
    order: Vec<NodeId>,
}

impl PetTopologyStore {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::default(),
            node_index: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn index_of(&self, id: &NodeId) -> Result<NodeIndex> {
        self.node_index
            .get(id)
            .copied()
            .ok_or_else(|| TopologyError::UnknownNode(id.clone()))
    }

    fn other_end(&self, edge: petgraph::stable_graph::EdgeReference<'_, f64>, node: NodeIndex) -> NodeIndex {
        if edge.source() == node {
            edge.target()
        } else {
            edge.source()
        }
    }

    fn incident_links(&self, idx: NodeIndex) -> Vec<Link> {
        let id = &self.graph[idx].id;
        let mut links: Vec<Link> = self
            .graph
            .edges(idx)
            .map(|edge| {
                let other = self.other_end(edge, idx);
                Link::new(id.clone(), self.graph[other].id.clone(), *edge.weight())
            })
            .collect();
        links.sort_by(|a, b| a.key.cmp(&b.key));
        links
    }
}

impl Default for PetTopologyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyStore for PetTopologyStore {
    fn add_node(&mut self, data: NodeData) -> Result<()> {
        if self.node_index.contains_key(&data.id) {
            return Err(TopologyError::DuplicateNode(data.id));
        }
        let id = data.id.clone();
        debug!(node = %id, kind = %data.kind, "adding node");
        let idx = self.graph.add_node(data);
        self.node_index.insert(id.clone(), idx);
        self.order.push(id);
        Ok(())
    }

    fn remove_node(&mut self, id: &NodeId) -> Result<Vec<Link>> {
        let Some(&idx) = self.node_index.get(id) else {
            return Err(TopologyError::NodeNotFound(id.clone()));
        };
        let removed = self.incident_links(idx);
        // StableGraph drops incident edges together with the node
        self.graph.remove_node(idx);
        self.node_index.remove(id);
        self.order.retain(|n| n != id);
        debug!(node = %id, links_removed = removed.len(), "removed node");
        Ok(removed)
    }

    fn add_link(&mut self, a: &NodeId, b: &NodeId, cost: f64) -> Result<Link> {
        let a_idx = self.index_of(a)?;
        let b_idx = self.index_of(b)?;
        if a == b {
            return Err(TopologyError::SelfLink(a.clone()));
        }
        if self.graph.find_edge(a_idx, b_idx).is_some() {
            return Err(TopologyError::duplicate_link(a, b));
        }
        if !is_valid_cost(cost) {
            return Err(TopologyError::InvalidCost(cost));
        }
        self.graph.add_edge(a_idx, b_idx, cost);
        debug!(a = %a, b = %b, cost, "added link");
        Ok(Link::new(a.clone(), b.clone(), cost))
    }

    fn modify_link(&mut self, a: &NodeId, b: &NodeId, cost: f64) -> Result<f64> {
        let edge = match (self.node_index.get(a), self.node_index.get(b)) {
            (Some(&a_idx), Some(&b_idx)) => self.graph.find_edge(a_idx, b_idx),
            _ => None,
        };
        let Some(edge) = edge else {
            return Err(TopologyError::link_not_found(a, b));
        };
        if !is_valid_cost(cost) {
            return Err(TopologyError::InvalidCost(cost));
        }
        let previous = std::mem::replace(&mut self.graph[edge], cost);
        debug!(a = %a, b = %b, previous, cost, "modified link");
        Ok(previous)
    }

    fn remove_link(&mut self, a: &NodeId, b: &NodeId) -> Option<Link> {
        let a_idx = *self.node_index.get(a)?;
        let b_idx = *self.node_index.get(b)?;
        let edge = self.graph.find_edge(a_idx, b_idx)?;
        let cost = self.graph.remove_edge(edge)?;
        debug!(a = %a, b = %b, "removed link");
        Some(Link::new(a.clone(), b.clone(), cost))
    }

    fn node(&self, id: &NodeId) -> Option<&NodeData> {
        self.node_index.get(id).map(|idx| &self.graph[*idx])
    }

    fn set_position(&mut self, id: &NodeId, position: Position) -> bool {
        match self.node_index.get(id) {
            Some(&idx) => {
                self.graph[idx].position = Some(position);
                true
            }
            None => false,
        }
    }

    fn link_cost(&self, a: &NodeId, b: &NodeId) -> Option<f64> {
        let a_idx = *self.node_index.get(a)?;
        let b_idx = *self.node_index.get(b)?;
        let edge = self.graph.find_edge(a_idx, b_idx)?;
        Some(self.graph[edge])
    }

    fn neighbors(&self, id: &NodeId) -> Vec<(NodeId, f64)> {
        let Some(&idx) = self.node_index.get(id) else {
            return Vec::new();
        };

        self.graph
            .edges(idx)
            .map(|edge| {
                let other = self.other_end(edge, idx);
                (self.graph[other].id.clone(), *edge.weight())
            })
            .collect()
    }

    fn nodes(&self) -> Vec<&NodeData> {
        self.order
            .iter()
            .filter_map(|id| self.node(id))
            .collect()
    }

    fn links(&self) -> Vec<Link> {
        let mut links: Vec<Link> = self
            .graph
            .edge_indices()
            .filter_map(|idx| {
                let (a, b) = self.graph.edge_endpoints(idx)?;
                Some(Link::new(
                    self.graph[a].id.clone(),
                    self.graph[b].id.clone(),
                    self.graph[idx],
                ))
            })
            .collect();
        links.sort_by(|a, b| a.key.cmp(&b.key));
        links
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn shortest_path(&self, from: &NodeId, to: &NodeId) -> Option<(Vec<NodeId>, f64)> {
        let from_idx = *self.node_index.get(from)?;
        let to_idx = *self.node_index.get(to)?;

        // Candidate scan in insertion order: the first node with a strictly
        // smaller tentative distance wins, so ties go to the earliest node.
        let order: Vec<NodeIndex> = self
            .order
            .iter()
            .filter_map(|id| self.node_index.get(id).copied())
            .collect();

        let mut dist: HashMap<NodeIndex, f64> = HashMap::new();
        let mut prev: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        dist.insert(from_idx, 0.0);

        for _ in 0..order.len() {
            let mut nearest: Option<(NodeIndex, f64)> = None;
            for &idx in &order {
                if visited.contains(&idx) {
                    continue;
                }
                if let Some(&d) = dist.get(&idx) {
                    if nearest.map_or(true, |(_, best)| d < best) {
                        nearest = Some((idx, d));
                    }
                }
            }

            let Some((node, cost)) = nearest else {
                break;
            };
            if node == to_idx {
                break;
            }
            visited.insert(node);

            for edge in self.graph.edges(node) {
                let next = self.other_end(edge, node);
                if visited.contains(&next) {
                    continue;
                }
                // Two finite costs can still sum to infinity.
                let next_cost = (cost + *edge.weight()).min(f64::MAX);
                if dist.get(&next).map_or(true, |&current| next_cost < current) {
                    dist.insert(next, next_cost);
                    prev.insert(next, node);
                }
            }
        }

        let cost = *dist.get(&to_idx)?;

        // Reconstruct path
        let mut path = vec![self.graph[to_idx].id.clone()];
        let mut current = to_idx;
        while current != from_idx {
            current = *prev.get(&current)?;
            path.push(self.graph[current].id.clone());
        }
        path.reverse();
        Some((path, cost))
    }

    fn connected_components(&self) -> usize {
        let mut visited = HashSet::new();
        let mut components = 0;

        for node_idx in self.graph.node_indices() {
            if visited.contains(&node_idx) {
                continue;
            }
            components += 1;
            let mut queue = VecDeque::new();
            queue.push_back(node_idx);
            visited.insert(node_idx);
            while let Some(current) = queue.pop_front() {
                for edge in self.graph.edges(current) {
                    let next = self.other_end(edge, current);
                    if visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        components
    }

    fn clear(&mut self) {
        self.graph.clear();
        self.node_index.clear();
        self.order.clear();
        debug!("cleared topology");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn store_with(nodes: &[&str]) -> PetTopologyStore {
        let mut store = PetTopologyStore::new();
        for n in nodes {
            store.add_node(NodeData::new(*n, NodeKind::Repeater)).unwrap();
        }
        store
    }

    #[test]
    fn add_and_retrieve_nodes() {
        let mut store = PetTopologyStore::new();
        store.add_node(NodeData::new("alice", NodeKind::Endpoint)).unwrap();

        assert_eq!(store.node_count(), 1);
        assert_eq!(store.node(&id("alice")).unwrap().kind, NodeKind::Endpoint);
        assert_eq!(
            store.add_node(NodeData::new("alice", NodeKind::Repeater)),
            Err(TopologyError::DuplicateNode(id("alice")))
        );
        // Rejected duplicate did not overwrite the original
        assert_eq!(store.node(&id("alice")).unwrap().kind, NodeKind::Endpoint);
    }

    #[test]
    fn link_cost_is_shared_by_both_directions() {
        let mut store = store_with(&["a", "b"]);
        store.add_link(&id("a"), &id("b"), 4.0).unwrap();
        assert_eq!(store.link_cost(&id("a"), &id("b")), Some(4.0));
        assert_eq!(store.link_cost(&id("b"), &id("a")), Some(4.0));

        store.modify_link(&id("b"), &id("a"), 2.5).unwrap();
        assert_eq!(store.link_cost(&id("a"), &id("b")), Some(2.5));
        assert_eq!(store.link_cost(&id("b"), &id("a")), Some(2.5));
        assert_eq!(store.link_count(), 1);
    }

    #[test]
    fn duplicate_link_is_rejected_without_change() {
        let mut store = store_with(&["a", "b"]);
        store.add_link(&id("a"), &id("b"), 4.0).unwrap();

        let err = store.add_link(&id("b"), &id("a"), 9.0).unwrap_err();
        assert_eq!(err, TopologyError::DuplicateLink(id("b"), id("a")));
        assert_eq!(store.link_count(), 1);
        assert_eq!(store.link_cost(&id("a"), &id("b")), Some(4.0));
    }

    #[test]
    fn add_link_error_kinds() {
        let mut store = store_with(&["a", "b"]);
        assert_eq!(
            store.add_link(&id("a"), &id("zz"), 1.0),
            Err(TopologyError::UnknownNode(id("zz")))
        );
        assert_eq!(
            store.add_link(&id("a"), &id("b"), -1.0),
            Err(TopologyError::InvalidCost(-1.0))
        );
        assert_eq!(
            store.add_link(&id("a"), &id("a"), 1.0),
            Err(TopologyError::SelfLink(id("a")))
        );
        assert!(matches!(
            store.add_link(&id("a"), &id("b"), f64::NAN),
            Err(TopologyError::InvalidCost(_))
        ));
        assert_eq!(store.link_count(), 0);
    }

    #[test]
    fn duplicate_link_reported_before_bad_cost() {
        let mut store = store_with(&["a", "b"]);
        store.add_link(&id("a"), &id("b"), 1.0).unwrap();
        assert_eq!(
            store.add_link(&id("b"), &id("a"), -1.0),
            Err(TopologyError::DuplicateLink(id("b"), id("a")))
        );
        assert_eq!(store.link_cost(&id("a"), &id("b")), Some(1.0));
    }

    #[test]
    fn huge_costs_saturate_instead_of_overflowing() {
        let mut store = store_with(&["a", "b", "c"]);
        store.add_link(&id("a"), &id("b"), f64::MAX).unwrap();
        store.add_link(&id("b"), &id("c"), f64::MAX).unwrap();

        let cost = store.shortest_path_cost(&id("a"), &id("c")).unwrap();
        assert!(cost.is_finite());
        assert_eq!(cost, f64::MAX);
    }

    #[test]
    fn modify_missing_link_fails() {
        let mut store = store_with(&["a", "b"]);
        assert_eq!(
            store.modify_link(&id("a"), &id("b"), 3.0),
            Err(TopologyError::LinkNotFound(id("a"), id("b")))
        );
        store.add_link(&id("a"), &id("b"), 1.0).unwrap();
        assert_eq!(
            store.modify_link(&id("a"), &id("b"), -3.0),
            Err(TopologyError::InvalidCost(-3.0))
        );
        assert_eq!(store.link_cost(&id("a"), &id("b")), Some(1.0));
    }

    #[test]
    fn remove_link_is_noop_when_absent() {
        let mut store = store_with(&["a", "b"]);
        assert!(store.remove_link(&id("a"), &id("b")).is_none());
        store.add_link(&id("a"), &id("b"), 1.0).unwrap();
        let removed = store.remove_link(&id("b"), &id("a")).unwrap();
        assert_eq!(removed.cost, 1.0);
        assert_eq!(store.link_count(), 0);
    }

    #[test]
    fn remove_node_cascades_to_incident_links_only() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        store.add_link(&id("a"), &id("b"), 1.0).unwrap();
        store.add_link(&id("b"), &id("c"), 1.0).unwrap();
        store.add_link(&id("b"), &id("d"), 1.0).unwrap();
        store.add_link(&id("c"), &id("d"), 1.0).unwrap();

        let degree = store.degree(&id("b"));
        let before = store.link_count();
        let removed = store.remove_node(&id("b")).unwrap();

        assert_eq!(removed.len(), degree);
        assert_eq!(before - store.link_count(), degree);
        assert_eq!(store.link_cost(&id("c"), &id("d")), Some(1.0));
        assert!(!store.contains_node(&id("b")));
        assert_eq!(
            store.remove_node(&id("b")),
            Err(TopologyError::NodeNotFound(id("b")))
        );
    }

    #[test]
    fn shortest_path_cost_basics() {
        let mut store = store_with(&["a", "b", "c", "lonely"]);
        store.add_link(&id("a"), &id("b"), 5.0).unwrap();
        store.add_link(&id("b"), &id("c"), 5.0).unwrap();

        assert_eq!(store.shortest_path_cost(&id("a"), &id("a")), Some(0.0));
        assert_eq!(store.shortest_path_cost(&id("a"), &id("c")), Some(10.0));
        assert_eq!(store.shortest_path_cost(&id("c"), &id("a")), Some(10.0));
        assert_eq!(store.shortest_path_cost(&id("a"), &id("lonely")), None);
        assert_eq!(store.shortest_path_cost(&id("a"), &id("ghost")), None);
    }

    #[test]
    fn shortest_path_prefers_cheaper_detour() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        store.add_link(&id("a"), &id("d"), 10.0).unwrap();
        store.add_link(&id("a"), &id("b"), 2.0).unwrap();
        store.add_link(&id("b"), &id("c"), 2.0).unwrap();
        store.add_link(&id("c"), &id("d"), 2.0).unwrap();

        let (path, cost) = store.shortest_path(&id("a"), &id("d")).unwrap();
        assert_eq!(cost, 6.0);
        assert_eq!(path, vec![id("a"), id("b"), id("c"), id("d")]);
    }

    #[test]
    fn equal_cost_routes_resolve_by_insertion_order() {
        // Two equal routes a-b-d and a-c-d; b was inserted first.
        let mut store = store_with(&["a", "b", "c", "d"]);
        store.add_link(&id("a"), &id("c"), 1.0).unwrap();
        store.add_link(&id("a"), &id("b"), 1.0).unwrap();
        store.add_link(&id("c"), &id("d"), 1.0).unwrap();
        store.add_link(&id("b"), &id("d"), 1.0).unwrap();

        let (path, cost) = store.shortest_path(&id("a"), &id("d")).unwrap();
        assert_eq!(cost, 2.0);
        assert_eq!(path, vec![id("a"), id("b"), id("d")]);
    }

    #[test]
    fn insertion_order_survives_slot_reuse() {
        let mut store = store_with(&["a", "b", "c"]);
        store.remove_node(&id("a")).unwrap();
        store.add_node(NodeData::new("z", NodeKind::Endpoint)).unwrap();

        let ids: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "z"]);
    }

    #[test]
    fn components_and_clear() {
        let mut store = store_with(&["a", "b", "c"]);
        store.add_link(&id("a"), &id("b"), 1.0).unwrap();
        assert_eq!(store.connected_components(), 2);

        store.clear();
        assert_eq!(store.node_count(), 0);
        assert_eq!(store.link_count(), 0);
        assert_eq!(store.connected_components(), 0);
    }

    #[test]
    fn positions_are_recorded() {
        let mut store = store_with(&["a"]);
        assert!(store.set_position(&id("a"), Position::new(3.0, 4.0)));
        assert!(!store.set_position(&id("nope"), Position::new(0.0, 0.0)));
        assert_eq!(store.node(&id("a")).unwrap().position, Some(Position::new(3.0, 4.0)));
    }
}
