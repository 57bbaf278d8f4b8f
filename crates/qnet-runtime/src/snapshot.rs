//! Snapshot codec: whole-network JSON import and export.
//!
//! The wire shape is the one the simulator and the graph renderer share:
//!
//! ```json
//! {
//!   "nodes": [{"id": "alice", "type": "endpoint", "x": 10.0, "y": 4.5}],
//!   "edges": [{"source": {"id": "alice", "type": "endpoint"},
//!              "target": {"id": "r1", "type": "repeater"}, "value": 3.0}]
//! }
//! ```
//!
//! Export writes each link twice, once per direction. Import accepts either
//! a `{id, ...}` object or a bare id string for `source`/`target`, merges the
//! two mirrors of a link, and refuses mirrors whose costs disagree.

use crate::topology_impl::PetTopologyStore;
use qnet_core::error::TopologyError;
use qnet_core::topology::TopologyStore;
use qnet_core::types::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown node type '{kind}' for node {id}")]
    UnknownNodeKind { id: NodeId, kind: String },

    #[error("Conflicting costs for link {a} <-> {b}: {first} vs {second}")]
    ConflictingCost {
        a: NodeId,
        b: NodeId,
        first: f64,
        second: f64,
    },

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Serialized form of a whole network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    #[serde(default)]
    pub nodes: Vec<SnapshotNode>,
    #[serde(default)]
    pub edges: Vec<SnapshotEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Anything else the renderer attached to the node.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub source: NodeRef,
    pub target: NodeRef,
    pub value: f64,
}

/// Edge endpoint: a node object on export, an object or bare id on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    Object {
        id: NodeId,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    },
    Id(NodeId),
}

impl NodeRef {
    pub fn id(&self) -> &NodeId {
        match self {
            NodeRef::Object { id, .. } | NodeRef::Id(id) => id,
        }
    }
}

impl NetworkSnapshot {
    /// The canonical cleared network.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of distinct undirected links, mirrors merged.
    pub fn link_count(&self) -> usize {
        let mut keys: Vec<LinkKey> = self
            .edges
            .iter()
            .map(|e| LinkKey::new(e.source.id().clone(), e.target.id().clone()))
            .collect();
        keys.sort();
        keys.dedup();
        keys.len()
    }
}

/// Export a store. Nodes keep insertion order; links are emitted in sorted
/// order, each as a forward and a reverse edge.
pub fn export_snapshot<T: TopologyStore + ?Sized>(store: &T) -> NetworkSnapshot {
    let nodes = store
        .nodes()
        .into_iter()
        .map(|n| SnapshotNode {
            id: n.id.clone(),
            kind: n.kind.as_str().to_string(),
            x: n.position.map(|p| p.x),
            y: n.position.map(|p| p.y),
            extra: n.attributes.clone(),
        })
        .collect();

    let node_ref = |id: &NodeId| NodeRef::Object {
        id: id.clone(),
        kind: store.node(id).map(|n| n.kind.as_str().to_string()),
    };

    let mut edges = Vec::with_capacity(store.link_count() * 2);
    for link in store.links() {
        let (low, high) = (link.low(), link.high());
        edges.push(SnapshotEdge {
            source: node_ref(low),
            target: node_ref(high),
            value: link.cost,
        });
        edges.push(SnapshotEdge {
            source: node_ref(high),
            target: node_ref(low),
            value: link.cost,
        });
    }

    NetworkSnapshot { nodes, edges }
}

/// Build a fresh store from a snapshot. Nothing is returned unless the
/// whole snapshot is valid.
pub fn import_snapshot(snapshot: &NetworkSnapshot) -> SnapshotResult<PetTopologyStore> {
    let mut store = PetTopologyStore::new();

    for node in &snapshot.nodes {
        let kind: NodeKind = node.kind.parse().map_err(|_| SnapshotError::UnknownNodeKind {
            id: node.id.clone(),
            kind: node.kind.clone(),
        })?;
        let mut data = NodeData::new(node.id.clone(), kind);
        if let (Some(x), Some(y)) = (node.x, node.y) {
            data.position = Some(Position::new(x, y));
        }
        data.attributes = node.extra.clone();
        store.add_node(data)?;
    }

    for edge in &snapshot.edges {
        let (a, b) = (edge.source.id(), edge.target.id());
        match store.link_cost(a, b) {
            Some(existing) if existing == edge.value => continue,
            Some(existing) => {
                return Err(SnapshotError::ConflictingCost {
                    a: a.clone(),
                    b: b.clone(),
                    first: existing,
                    second: edge.value,
                })
            }
            None => {
                store.add_link(a, b, edge.value)?;
            }
        }
    }

    Ok(store)
}

pub fn to_json(snapshot: &NetworkSnapshot) -> SnapshotResult<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn from_json(json: &str) -> SnapshotResult<NetworkSnapshot> {
    Ok(serde_json::from_str(json)?)
}

/// Read a snapshot file.
pub fn load_snapshot(path: impl AsRef<Path>) -> SnapshotResult<NetworkSnapshot> {
    let content = std::fs::read_to_string(path)?;
    from_json(&content)
}

/// Write a snapshot file, replacing any previous content.
pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &NetworkSnapshot) -> SnapshotResult<()> {
    std::fs::write(path, to_json(snapshot)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn sample() -> PetTopologyStore {
        let mut store = PetTopologyStore::new();
        store
            .add_node(NodeData::new("alice", NodeKind::Endpoint).with_position(Position::new(1.0, 2.0)))
            .unwrap();
        store.add_node(NodeData::new("r1", NodeKind::Repeater)).unwrap();
        store.add_node(NodeData::new("bob", NodeKind::Endpoint)).unwrap();
        store.add_link(&id("alice"), &id("r1"), 3.0).unwrap();
        store.add_link(&id("r1"), &id("bob"), 4.5).unwrap();
        store
    }

    #[test]
    fn export_writes_both_mirrors() {
        let snapshot = export_snapshot(&sample());
        assert_eq!(snapshot.nodes.len(), 3);
        assert_eq!(snapshot.edges.len(), 4);
        assert_eq!(snapshot.link_count(), 2);
        assert_eq!(snapshot.nodes[0].x, Some(1.0));
        assert_eq!(snapshot.nodes[1].kind, "repeater");
    }

    #[test]
    fn round_trip_preserves_nodes_and_links() {
        let store = sample();
        let json = to_json(&export_snapshot(&store)).unwrap();
        let restored = import_snapshot(&from_json(&json).unwrap()).unwrap();

        let ids = |s: &PetTopologyStore| s.nodes().iter().map(|n| n.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&restored), ids(&store));
        assert_eq!(restored.links(), store.links());
        assert_eq!(
            restored.node(&id("alice")).unwrap().position,
            Some(Position::new(1.0, 2.0))
        );
    }

    #[test]
    fn import_accepts_bare_id_references() {
        let json = r#"{
            "nodes": [
                {"id": "a", "type": "endpoint", "label": "Alice"},
                {"id": "b", "type": "Repeater"}
            ],
            "edges": [{"source": "a", "target": {"id": "b"}, "value": 2}]
        }"#;
        let store = import_snapshot(&from_json(json).unwrap()).unwrap();
        assert_eq!(store.link_cost(&id("b"), &id("a")), Some(2.0));
        assert_eq!(
            store.node(&id("a")).unwrap().attributes.get("label"),
            Some(&serde_json::json!("Alice"))
        );
    }

    #[test]
    fn conflicting_mirrors_are_rejected() {
        let json = r#"{
            "nodes": [{"id": "a", "type": "endpoint"}, {"id": "b", "type": "endpoint"}],
            "edges": [
                {"source": "a", "target": "b", "value": 2},
                {"source": "b", "target": "a", "value": 3}
            ]
        }"#;
        let err = import_snapshot(&from_json(json).unwrap()).unwrap_err();
        assert!(matches!(err, SnapshotError::ConflictingCost { first, second, .. } if first == 2.0 && second == 3.0));
    }

    #[test]
    fn invalid_content_is_reported() {
        let unknown_kind = r#"{"nodes": [{"id": "a", "type": "satellite"}], "edges": []}"#;
        assert!(matches!(
            import_snapshot(&from_json(unknown_kind).unwrap()),
            Err(SnapshotError::UnknownNodeKind { .. })
        ));

        let dangling = r#"{"nodes": [{"id": "a", "type": "endpoint"}],
                           "edges": [{"source": "a", "target": "ghost", "value": 1}]}"#;
        assert!(matches!(
            import_snapshot(&from_json(dangling).unwrap()),
            Err(SnapshotError::Topology(TopologyError::UnknownNode(_)))
        ));

        assert!(matches!(from_json("{not json"), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn empty_snapshot_is_cleared_network() {
        let store = import_snapshot(&from_json(r#"{"nodes": [], "edges": []}"#).unwrap()).unwrap();
        assert_eq!(store.node_count(), 0);
        assert_eq!(export_snapshot(&store), NetworkSnapshot::empty());
    }

    #[test]
    fn file_helpers_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.json");
        let snapshot = export_snapshot(&sample());

        save_snapshot(&path, &snapshot).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), snapshot);
        assert!(matches!(
            load_snapshot(dir.path().join("missing.json")),
            Err(SnapshotError::Io(_))
        ));
    }
}
