//! # qnet
//!
//! Quantum network topology, edge validation and entanglement highlight
//! scheduling.
//!
//! qnet keeps the user's view of a quantum repeater network: endpoints and
//! repeaters joined by weighted undirected links. It checks proposed link
//! costs against existing routes, mirrors every change to a network
//! simulator, and turns the simulator's entanglement reports into timed
//! highlight schedules a renderer can play back.
//!
//! ## Quick Start
//!
//! ```rust
//! use qnet::prelude::*;
//!
//! let mut network = Network::new();
//! network.add_node("alice", NodeKind::Endpoint).unwrap();
//! network.add_node("r1", NodeKind::Repeater).unwrap();
//! network.add_node("bob", NodeKind::Endpoint).unwrap();
//!
//! let (alice, r1, bob) = (NodeId::from("alice"), NodeId::from("r1"), NodeId::from("bob"));
//! network.add_link(&alice, &r1, 2.0).unwrap();
//! network.add_link(&r1, &bob, 3.0).unwrap();
//!
//! // A direct link may not cost more than the existing route.
//! assert!(network.is_proposal_valid(&alice, &bob, 5.0));
//! assert!(!network.is_proposal_valid(&alice, &bob, 5.5));
//! ```
//!
//! ## Highlight Schedules
//!
//! ```rust
//! use qnet::prelude::*;
//!
//! let report: ConnectionResult = sample_report();
//! let schedule = compile(&interpret(&report));
//!
//! for ins in schedule.timeline() {
//!     println!("{:>5} ms  {} -> {}  {}", ins.start_offset_ms, ins.from, ins.to, ins.color.as_str());
//! }
//! # fn sample_report() -> ConnectionResult {
//! #     ConnectionResult {
//! #         path: vec!["alice".into(), "r1".into(), "bob".into()],
//! #         operations: vec![
//! #             Operation::link_generation("alice", "r1", OperationStatus::Success),
//! #             Operation::link_generation("r1", "bob", OperationStatus::Success),
//! #             Operation::swap(["alice", "r1"], ["r1", "bob"], OperationStatus::Failed),
//! #         ],
//! #     }
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`qnet_core`] - Shared types, the `TopologyStore` trait, segments and schedules
//! - [`qnet_runtime`] - Petgraph store, validator, interpreter, compiler,
//!   event bus, snapshots, simulator backends and the network manager

// Re-export all subcrates
pub use qnet_core as core;
pub use qnet_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use qnet::prelude::*;
/// ```
pub mod prelude {
    pub use qnet_runtime::prelude::*;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
