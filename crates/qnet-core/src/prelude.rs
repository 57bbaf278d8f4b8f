//! qnet Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use qnet_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    NodeId, NodeKind, NodeData, Position,
    Link, LinkKey, is_valid_cost,
};

pub use crate::segment::{OutcomeKind, Segment};

pub use crate::highlight::{
    HighlightAction, HighlightColor, HighlightInstruction, Schedule,
};

// Re-export the TopologyStore trait
pub use crate::topology::TopologyStore;

// Re-export error types
pub use crate::error::{Result, TopologyError};
