//! Network manager: one user action, end to end.
//!
//! Each action is checked locally first, mirrored to the simulator second,
//! and applied to the local [`Network`] last. If the local check or the
//! simulator call fails the local network is untouched and no event is
//! published.

use crate::backend::{BackendError, NetworkBackend};
use crate::network::Network;
use crate::snapshot::{export_snapshot, import_snapshot, NetworkSnapshot, SnapshotError};
use crate::validator::ProposalCheck;
use qnet_core::error::TopologyError;
use qnet_core::highlight::Schedule;
use qnet_core::topology::TopologyStore;
use qnet_core::types::*;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Link cost {proposed} for {a} <-> {b} exceeds the cheapest existing route ({bound})")]
    Rejected {
        a: NodeId,
        b: NodeId,
        proposed: f64,
        bound: f64,
    },

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error("Simulator call failed: {0}")]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Couples the local network with a simulator backend.
pub struct NetworkManager<B: NetworkBackend> {
    network: Network,
    backend: B,
}

impl<B: NetworkBackend> NetworkManager<B> {
    pub fn new(backend: B) -> Self {
        Self::with_network(Network::new(), backend)
    }

    pub fn with_network(network: Network, backend: B) -> Self {
        Self { network, backend }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Mutable access for listener registration and subscriptions.
    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    pub async fn add_node(&mut self, id: impl Into<NodeId>, kind: NodeKind) -> ManagerResult<()> {
        let id = id.into();
        if self.store().contains_node(&id) {
            return Err(TopologyError::DuplicateNode(id).into());
        }
        self.backend.add_node(&id, kind).await?;
        self.network.add_node(id, kind)?;
        Ok(())
    }

    pub async fn remove_node(&mut self, id: &NodeId) -> ManagerResult<Vec<Link>> {
        if !self.store().contains_node(id) {
            return Err(TopologyError::NodeNotFound(id.clone()).into());
        }
        self.backend.remove_node(id).await?;
        Ok(self.network.remove_node(id)?)
    }

    /// Add a link after checking it against the cheapest existing route.
    pub async fn add_link(&mut self, a: &NodeId, b: &NodeId, cost: f64) -> ManagerResult<Link> {
        self.check_endpoints(a, b)?;
        if self.store().link_cost(a, b).is_some() {
            return Err(TopologyError::duplicate_link(a, b).into());
        }
        check_cost(cost)?;
        self.validate(a, b, cost)?;
        self.backend.add_edge(a, b, cost).await?;
        Ok(self.network.add_link(a, b, cost)?)
    }

    /// Change a link's cost. Returns the previous cost.
    pub async fn modify_link(&mut self, a: &NodeId, b: &NodeId, cost: f64) -> ManagerResult<f64> {
        self.check_endpoints(a, b)?;
        if self.store().link_cost(a, b).is_none() {
            return Err(TopologyError::link_not_found(a, b).into());
        }
        check_cost(cost)?;
        self.validate(a, b, cost)?;
        self.backend.modify_edge(a, b, cost).await?;
        Ok(self.network.modify_link(a, b, cost)?)
    }

    pub async fn remove_link(&mut self, a: &NodeId, b: &NodeId) -> ManagerResult<Link> {
        if self.store().link_cost(a, b).is_none() {
            return Err(TopologyError::link_not_found(a, b).into());
        }
        self.backend.remove_edge(a, b).await?;
        self.network
            .remove_link(a, b)
            .ok_or_else(|| TopologyError::link_not_found(a, b).into())
    }

    /// Request entanglement and compile the simulator's report into a
    /// highlight schedule. The schedule is also published to subscribers.
    pub async fn request_entanglement(&mut self, e1: &NodeId, e2: &NodeId) -> ManagerResult<Schedule> {
        self.require_node(e1)?;
        self.require_node(e2)?;
        let result = self.backend.request_entanglement(e1, e2).await?;
        info!(
            from = %e1,
            to = %e2,
            hops = result.path.len().saturating_sub(1),
            operations = result.operations.len(),
            "entanglement attempt reported"
        );
        Ok(self.network.highlight(&result))
    }

    /// Replace the whole network. The snapshot is validated before the
    /// simulator sees it.
    pub async fn import_network(&mut self, snapshot: &NetworkSnapshot) -> ManagerResult<()> {
        let store = import_snapshot(snapshot)?;
        self.backend.import_network(snapshot).await?;
        self.network.replace(store);
        Ok(())
    }

    pub fn export_network(&self) -> NetworkSnapshot {
        export_snapshot(self.store())
    }

    pub async fn clear_network(&mut self) -> ManagerResult<()> {
        self.backend.clear_network().await?;
        self.network.clear();
        Ok(())
    }

    pub async fn create_epr(&self, a: &NodeId, b: &NodeId) -> ManagerResult<serde_json::Value> {
        self.require_node(a)?;
        self.require_node(b)?;
        Ok(self.backend.create_epr(a, b).await?)
    }

    pub async fn measure(&self, node: &NodeId) -> ManagerResult<serde_json::Value> {
        self.require_node(node)?;
        Ok(self.backend.measure(node).await?)
    }

    pub async fn teleport(&self, sender: &NodeId, receiver: &NodeId) -> ManagerResult<serde_json::Value> {
        self.require_node(sender)?;
        self.require_node(receiver)?;
        Ok(self.backend.teleport(sender, receiver).await?)
    }

    pub async fn superdense_coding(
        &self,
        sender: &NodeId,
        receiver: &NodeId,
        message: &str,
    ) -> ManagerResult<serde_json::Value> {
        self.require_node(sender)?;
        self.require_node(receiver)?;
        Ok(self.backend.superdense_coding(sender, receiver, message).await?)
    }

    fn store(&self) -> &crate::topology_impl::PetTopologyStore {
        self.network.store()
    }

    fn require_node(&self, id: &NodeId) -> ManagerResult<()> {
        if self.store().contains_node(id) {
            Ok(())
        } else {
            Err(TopologyError::UnknownNode(id.clone()).into())
        }
    }

    /// Endpoint checks, in the order the store applies them.
    fn check_endpoints(&self, a: &NodeId, b: &NodeId) -> ManagerResult<()> {
        self.require_node(a)?;
        self.require_node(b)?;
        if a == b {
            return Err(TopologyError::SelfLink(a.clone()).into());
        }
        Ok(())
    }

    fn validate(&self, a: &NodeId, b: &NodeId, cost: f64) -> ManagerResult<()> {
        match self.network.check_proposal(a, b, cost) {
            ProposalCheck::ExceedsBound { proposed, bound } => {
                warn!(%a, %b, proposed, bound, "link cost rejected");
                Err(ManagerError::Rejected {
                    a: a.clone(),
                    b: b.clone(),
                    proposed,
                    bound,
                })
            }
            _ => Ok(()),
        }
    }
}

fn check_cost(cost: f64) -> ManagerResult<()> {
    if is_valid_cost(cost) {
        Ok(())
    } else {
        Err(TopologyError::InvalidCost(cost).into())
    }
}
