//! Outcome interpreter: turns a connection attempt report into segments.
//!
//! The simulator reports an end-to-end path plus the link-generation and
//! swap operations it ran. Each link generation maps to one segment. A
//! failed swap invalidates the whole sub-path it was meant to merge, so it
//! expands to every elementary hop between the far ends of its two inputs.
//!
//! Interpretation never fails: malformed operations are skipped.

use qnet_core::segment::{OutcomeKind, Segment};
use qnet_core::types::NodeId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Result of a connection (entanglement) request as reported by the simulator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionResult {
    /// End-to-end path, endpoints included.
    #[serde(default)]
    pub path: Vec<NodeId>,
    /// Operations in the order the simulator reported them. An entry that
    /// cannot be decoded becomes [`Operation::Other`].
    #[serde(default, deserialize_with = "tolerant_operations")]
    pub operations: Vec<Operation>,
}

/// One simulator operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Elementary link generation between two adjacent path nodes.
    LinkGeneration {
        #[serde(default)]
        status: OperationStatus,
        #[serde(default)]
        nodes: Vec<NodeId>,
    },
    /// Entanglement swap merging two input links at an intermediate node.
    Swap {
        #[serde(default)]
        status: OperationStatus,
        #[serde(default)]
        inputs: Vec<Vec<NodeId>>,
    },
    /// Any operation type this interpreter does not know.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Success,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Operation {
    pub fn link_generation(a: impl Into<NodeId>, b: impl Into<NodeId>, status: OperationStatus) -> Self {
        Operation::LinkGeneration {
            status,
            nodes: vec![a.into(), b.into()],
        }
    }

    pub fn swap(first: [&str; 2], second: [&str; 2], status: OperationStatus) -> Self {
        Operation::Swap {
            status,
            inputs: vec![
                first.iter().map(|s| NodeId::from(*s)).collect(),
                second.iter().map(|s| NodeId::from(*s)).collect(),
            ],
        }
    }
}

fn tolerant_operations<'de, D>(deserializer: D) -> Result<Vec<Operation>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => Vec::new(),
        other => {
            warn!(value = %other, "operations is not a list, ignoring");
            Vec::new()
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry).unwrap_or_else(|e| {
                warn!(index, error = %e, "undecodable operation");
                Operation::Other
            })
        })
        .collect())
}

/// Interpret a full connection result.
pub fn interpret(result: &ConnectionResult) -> Vec<Segment> {
    interpret_operations(&result.path, &result.operations)
}

/// Convert operations into segments, preserving operation order.
///
/// Overlapping failed swaps may yield the same hop more than once; the
/// duplicates are kept.
pub fn interpret_operations(path: &[NodeId], operations: &[Operation]) -> Vec<Segment> {
    let mut segments = Vec::new();

    for (position, op) in operations.iter().enumerate() {
        match op {
            Operation::LinkGeneration { status, nodes } => {
                let [a, b] = nodes.as_slice() else {
                    warn!(position, count = nodes.len(), "link generation without exactly two nodes, skipping");
                    continue;
                };
                let kind = match status {
                    OperationStatus::Success => OutcomeKind::Success,
                    OperationStatus::Failed => OutcomeKind::FailedGeneration,
                    OperationStatus::Unknown => {
                        warn!(position, "link generation with unknown status, skipping");
                        continue;
                    }
                };
                segments.push(Segment::new(a.clone(), b.clone(), kind));
            }
            Operation::Swap { status: OperationStatus::Failed, inputs } => {
                let Some((lo, hi)) = swap_span(path, inputs) else {
                    warn!(position, "failed swap inputs do not resolve onto the path, skipping");
                    continue;
                };
                for k in lo..hi {
                    segments.push(Segment::failed_swap(path[k].clone(), path[k + 1].clone()));
                }
            }
            Operation::Swap { .. } => {}
            Operation::Other => {
                warn!(position, "unknown operation type, skipping");
            }
        }
    }

    segments
}

/// Path positions `(lo, hi)` of the first node of each swap input pair.
fn swap_span(path: &[NodeId], inputs: &[Vec<NodeId>]) -> Option<(usize, usize)> {
    let [first, second] = inputs else {
        return None;
    };
    let i0 = position_of(path, first.first()?)?;
    let i1 = position_of(path, second.first()?)?;
    Some((i0.min(i1), i0.max(i1)))
}

fn position_of(path: &[NodeId], node: &NodeId) -> Option<usize> {
    path.iter().position(|n| n == node)
}
