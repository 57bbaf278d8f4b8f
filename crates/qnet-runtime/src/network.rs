//! Network: an observable topology store.
//!
//! Wraps a [`PetTopologyStore`] and publishes one [`TopologyEvent`] per
//! successful mutation. Failed mutations change nothing and publish
//! nothing. Share across threads behind a `RwLock`: mutations need the
//! write half, queries only the read half.

use crate::events::{EventBus, TopologyEvent, TopologyListener};
use crate::outcome::{interpret, ConnectionResult};
use crate::schedule::ScheduleCompiler;
use crate::topology_impl::PetTopologyStore;
use crate::validator::{EdgeValidator, ProposalCheck};
use qnet_core::error::Result;
use qnet_core::highlight::Schedule;
use qnet_core::topology::TopologyStore;
use qnet_core::types::*;
use serde::Serialize;
use std::sync::mpsc;

/// Summary counters for a network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkStats {
    pub endpoints: usize,
    pub repeaters: usize,
    pub links: usize,
    pub components: usize,
    pub total_cost: f64,
}

#[derive(Debug, Default)]
pub struct Network {
    store: PetTopologyStore,
    bus: EventBus,
    compiler: ScheduleCompiler,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: PetTopologyStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn with_compiler(mut self, compiler: ScheduleCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &PetTopologyStore {
        &self.store
    }

    pub fn compiler(&self) -> &ScheduleCompiler {
        &self.compiler
    }

    pub fn register(&mut self, listener: impl TopologyListener + 'static) {
        self.bus.register(listener);
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<TopologyEvent> {
        self.bus.subscribe()
    }

    pub fn add_node(&mut self, id: impl Into<NodeId>, kind: NodeKind) -> Result<()> {
        let id = id.into();
        self.store.add_node(NodeData::new(id.clone(), kind))?;
        self.bus.publish(TopologyEvent::NodeAdded { id, kind });
        Ok(())
    }

    pub fn remove_node(&mut self, id: &NodeId) -> Result<Vec<Link>> {
        let links = self.store.remove_node(id)?;
        self.bus.publish(TopologyEvent::NodeRemoved {
            id: id.clone(),
            links: links.clone(),
        });
        Ok(links)
    }

    pub fn add_link(&mut self, a: &NodeId, b: &NodeId, cost: f64) -> Result<Link> {
        let link = self.store.add_link(a, b, cost)?;
        self.bus.publish(TopologyEvent::LinkAdded { link: link.clone() });
        Ok(link)
    }

    pub fn modify_link(&mut self, a: &NodeId, b: &NodeId, cost: f64) -> Result<f64> {
        let previous_cost = self.store.modify_link(a, b, cost)?;
        self.bus.publish(TopologyEvent::LinkModified {
            link: Link::new(a.clone(), b.clone(), cost),
            previous_cost,
        });
        Ok(previous_cost)
    }

    pub fn remove_link(&mut self, a: &NodeId, b: &NodeId) -> Option<Link> {
        let link = self.store.remove_link(a, b)?;
        self.bus.publish(TopologyEvent::LinkRemoved { link: link.clone() });
        Some(link)
    }

    pub fn set_position(&mut self, id: &NodeId, position: Position) -> bool {
        self.store.set_position(id, position)
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.bus.publish(TopologyEvent::Cleared);
    }

    /// Swap in a fully built store, e.g. from a snapshot import.
    pub fn replace(&mut self, store: PetTopologyStore) {
        let nodes = store.node_count();
        let links = store.link_count();
        self.store = store;
        self.bus.publish(TopologyEvent::Imported { nodes, links });
    }

    pub fn shortest_path_cost(&self, a: &NodeId, b: &NodeId) -> Option<f64> {
        self.store.shortest_path_cost(a, b)
    }

    pub fn check_proposal(&self, a: &NodeId, b: &NodeId, cost: f64) -> ProposalCheck {
        EdgeValidator::new(&self.store).check(a, b, cost)
    }

    pub fn is_proposal_valid(&self, a: &NodeId, b: &NodeId, cost: f64) -> bool {
        self.check_proposal(a, b, cost).is_valid()
    }

    /// Interpret a connection result, compile it and publish the schedule.
    pub fn highlight(&mut self, result: &ConnectionResult) -> Schedule {
        let segments = interpret(result);
        let schedule = self.compiler.compile(&segments);
        self.bus.publish(TopologyEvent::PathHighlighted {
            schedule: schedule.clone(),
        });
        schedule
    }

    pub fn stats(&self) -> NetworkStats {
        let nodes = self.store.nodes();
        let endpoints = nodes.iter().filter(|n| n.kind == NodeKind::Endpoint).count();
        let links = self.store.links();
        NetworkStats {
            endpoints,
            repeaters: nodes.len() - endpoints,
            links: links.len(),
            components: self.store.connected_components(),
            total_cost: links.iter().map(|l| l.cost).sum(),
        }
    }
}
