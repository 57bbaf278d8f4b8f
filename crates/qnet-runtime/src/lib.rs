//! # qnet Runtime
//!
//! Topology store, edge validation, outcome interpretation and highlight
//! scheduling.
//!
//! The runtime holds the network as the user sees it. Mutations flow
//! through a [`manager::NetworkManager`], which mirrors them to the
//! simulator backend and applies them to a [`network::Network`]; the
//! network publishes every change on its event bus. Entanglement reports
//! coming back from the simulator are interpreted into segments and
//! compiled into a timed highlight [`Schedule`](qnet_core::highlight::Schedule).

pub mod topology_impl;
pub mod validator;
pub mod outcome;
pub mod schedule;
pub mod events;
pub mod network;
pub mod snapshot;
pub mod backend;
#[cfg(feature = "http")]
pub mod http;
pub mod manager;
pub mod prelude;
