//! Path segments: elementary hops tagged with an attempt outcome.

use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// How an attempt over a segment turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Link generation over the hop succeeded.
    Success,
    /// Link generation over the hop failed.
    FailedGeneration,
    /// The hop lies under a swap that failed.
    FailedSwap,
}

/// One hop `(from, to)` between adjacent path nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: OutcomeKind,
}

impl Segment {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, kind: OutcomeKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }

    pub fn success(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self::new(from, to, OutcomeKind::Success)
    }

    pub fn failed_generation(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self::new(from, to, OutcomeKind::FailedGeneration)
    }

    pub fn failed_swap(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self::new(from, to, OutcomeKind::FailedSwap)
    }

    pub fn is_failed_swap(&self) -> bool {
        self.kind == OutcomeKind::FailedSwap
    }
}
