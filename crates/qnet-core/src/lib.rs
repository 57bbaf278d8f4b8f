//! # qnet Core
//!
//! Core traits and types shared by every qnet crate.
//!
//! - **Topology** - nodes (endpoints and repeaters) joined by weighted
//!   undirected links, stored once per unordered pair
//! - **Segments** - elementary path hops tagged with how an entanglement
//!   attempt over them turned out
//! - **Highlights** - timed set/fade directives a renderer plays back
//!
//! ## Quick Start
//!
//! ```rust
//! use qnet_core::prelude::*;
//!
//! let key = LinkKey::new(NodeId::from("b"), NodeId::from("a"));
//! assert_eq!(key.low().as_str(), "a");
//! assert_eq!(key.high().as_str(), "b");
//! ```

pub mod types;
pub mod segment;
pub mod highlight;
pub mod topology;
pub mod error;
pub mod prelude;
