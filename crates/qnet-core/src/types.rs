//! Shared types used across all qnet crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a node in the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// What role a node plays in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Terminal node that requests entanglement.
    Endpoint,
    /// Intermediate node that performs entanglement swaps.
    Repeater,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Endpoint => "endpoint",
            NodeKind::Repeater => "repeater",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "endpoint" => Ok(NodeKind::Endpoint),
            "repeater" => Ok(NodeKind::Repeater),
            other => Err(format!("unknown node kind: {other}")),
        }
    }
}

/// A position on the renderer's canvas.
///
/// The core never reads this; it is carried so layouts survive a
/// snapshot round trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A node stored in the topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: NodeId,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Renderer-owned fields, round-tripped opaquely.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl NodeData {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            position: None,
            attributes: serde_json::Map::new(),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Canonical key for an unordered node pair: `low <= high` always.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkKey {
    low: NodeId,
    high: NodeId,
}

impl LinkKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> &NodeId {
        &self.low
    }

    pub fn high(&self) -> &NodeId {
        &self.high
    }

    /// Whether `node` is one of the two endpoints.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.low == node || &self.high == node
    }

    /// The endpoint opposite `node`, if `node` is on this link.
    pub fn other(&self, node: &NodeId) -> Option<&NodeId> {
        if &self.low == node {
            Some(&self.high)
        } else if &self.high == node {
            Some(&self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.low, self.high)
    }
}

/// A weighted undirected link, stored once per unordered pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub key: LinkKey,
    pub cost: f64,
}

impl Link {
    pub fn new(a: NodeId, b: NodeId, cost: f64) -> Self {
        Self {
            key: LinkKey::new(a, b),
            cost,
        }
    }

    pub fn low(&self) -> &NodeId {
        self.key.low()
    }

    pub fn high(&self) -> &NodeId {
        self.key.high()
    }
}

/// Whether a cost can be stored on a link.
pub fn is_valid_cost(cost: f64) -> bool {
    cost.is_finite() && cost >= 0.0
}
