//! Topology change notifications.
//!
//! Renderers learn about mutations through an explicit [`EventBus`]:
//! either a registered [`TopologyListener`] called synchronously, or a
//! channel obtained from [`EventBus::subscribe`]. Every consumer sees
//! events in the order they were published.

use qnet_core::highlight::Schedule;
use qnet_core::types::{Link, NodeId, NodeKind};
use serde::Serialize;
use std::sync::mpsc;

/// Events emitted by a [`Network`](crate::network::Network).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TopologyEvent {
    /// A node was added.
    NodeAdded { id: NodeId, kind: NodeKind },
    /// A node was removed together with its incident links.
    NodeRemoved { id: NodeId, links: Vec<Link> },
    /// A link was added.
    LinkAdded { link: Link },
    /// A link's cost changed.
    LinkModified { link: Link, previous_cost: f64 },
    /// A link was removed.
    LinkRemoved { link: Link },
    /// Every node and link was removed.
    Cleared,
    /// The whole topology was replaced from a snapshot.
    Imported { nodes: usize, links: usize },
    /// A connection attempt was compiled into a highlight schedule.
    /// Supersedes any schedule published earlier.
    PathHighlighted { schedule: Schedule },
}

/// Synchronous observer of topology events.
pub trait TopologyListener: Send + Sync {
    fn on_event(&self, event: &TopologyEvent);
}

impl<F> TopologyListener for F
where
    F: Fn(&TopologyEvent) + Send + Sync,
{
    fn on_event(&self, event: &TopologyEvent) {
        self(event)
    }
}

/// Fan-out of topology events to listeners and channel subscribers.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn TopologyListener>>,
    subscribers: Vec<mpsc::Sender<TopologyEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners are called in registration order.
    pub fn register(&mut self, listener: impl TopologyListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Open a FIFO channel of future events.
    pub fn subscribe(&mut self) -> mpsc::Receiver<TopologyEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver an event to every listener, then every live subscriber.
    /// Subscribers whose receiver was dropped are forgotten.
    pub fn publish(&mut self, event: TopologyEvent) {
        for listener in &self.listeners {
            listener.on_event(&event);
        }
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn listeners_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        let first = log.clone();
        bus.register(move |_: &TopologyEvent| first.lock().unwrap().push("first"));
        let second = log.clone();
        bus.register(move |_: &TopologyEvent| second.lock().unwrap().push("second"));

        bus.publish(TopologyEvent::Cleared);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn subscribers_receive_fifo_and_are_pruned_when_dropped() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        let dropped = bus.subscribe();
        drop(dropped);

        bus.publish(TopologyEvent::NodeAdded {
            id: NodeId::from("a"),
            kind: NodeKind::Endpoint,
        });
        bus.publish(TopologyEvent::Cleared);

        assert_eq!(bus.subscriber_count(), 1);
        let received: Vec<TopologyEvent> = rx.try_iter().collect();
        assert_eq!(received.len(), 2);
        assert_eq!(received[1], TopologyEvent::Cleared);
    }
}
