//! Edge validator: keeps direct link costs consistent with existing routes.
//!
//! A direct link may not be priced above the cheapest route that already
//! connects its endpoints. When no route exists there is nothing to compare
//! against and any cost is accepted.

use qnet_core::topology::TopologyStore;
use qnet_core::types::NodeId;
use serde::Serialize;

/// Outcome of checking a proposed link cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ProposalCheck {
    /// No route connects the endpoints.
    Unconstrained,
    /// The proposal is at most the cheapest existing route.
    WithinBound { proposed: f64, bound: f64 },
    /// The proposal exceeds the cheapest existing route.
    ExceedsBound { proposed: f64, bound: f64 },
}

impl ProposalCheck {
    pub fn is_valid(&self) -> bool {
        !matches!(self, ProposalCheck::ExceedsBound { .. })
    }

    /// Cheapest existing route cost, if any.
    pub fn bound(&self) -> Option<f64> {
        match self {
            ProposalCheck::Unconstrained => None,
            ProposalCheck::WithinBound { bound, .. } | ProposalCheck::ExceedsBound { bound, .. } => {
                Some(*bound)
            }
        }
    }
}

/// Read-only validator over a topology store.
pub struct EdgeValidator<'a, T: TopologyStore + ?Sized> {
    store: &'a T,
}

impl<'a, T: TopologyStore + ?Sized> EdgeValidator<'a, T> {
    pub fn new(store: &'a T) -> Self {
        Self { store }
    }

    /// Compare `proposed` against the current cheapest route from `a` to `b`.
    ///
    /// When modifying an existing link the route search includes that link,
    /// so a modification can only keep or lower the direct cost unless an
    /// alternative route is cheaper still.
    pub fn check(&self, a: &NodeId, b: &NodeId, proposed: f64) -> ProposalCheck {
        match self.store.shortest_path_cost(a, b) {
            None => ProposalCheck::Unconstrained,
            Some(bound) if proposed <= bound => ProposalCheck::WithinBound { proposed, bound },
            Some(bound) => ProposalCheck::ExceedsBound { proposed, bound },
        }
    }

    pub fn is_proposal_valid(&self, a: &NodeId, b: &NodeId, proposed: f64) -> bool {
        self.check(a, b, proposed).is_valid()
    }
}

/// Convenience wrapper around [`EdgeValidator::is_proposal_valid`].
pub fn is_proposal_valid<T: TopologyStore + ?Sized>(
    store: &T,
    a: &NodeId,
    b: &NodeId,
    proposed: f64,
) -> bool {
    EdgeValidator::new(store).is_proposal_valid(a, b, proposed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology_impl::PetTopologyStore;
    use qnet_core::types::{NodeData, NodeKind};

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn triangle() -> PetTopologyStore {
        let mut store = PetTopologyStore::new();
        for n in ["A", "B", "C"] {
            store.add_node(NodeData::new(n, NodeKind::Repeater)).unwrap();
        }
        store.add_link(&id("A"), &id("B"), 5.0).unwrap();
        store.add_link(&id("B"), &id("C"), 5.0).unwrap();
        store
    }

    #[test]
    fn accepts_cost_at_or_below_detour() {
        let store = triangle();
        assert!(is_proposal_valid(&store, &id("A"), &id("C"), 3.0));
        assert!(is_proposal_valid(&store, &id("A"), &id("C"), 10.0));
    }

    #[test]
    fn rejects_cost_above_detour() {
        let store = triangle();
        assert!(!is_proposal_valid(&store, &id("A"), &id("C"), 11.0));

        let check = EdgeValidator::new(&store).check(&id("A"), &id("C"), 11.0);
        assert_eq!(check, ProposalCheck::ExceedsBound { proposed: 11.0, bound: 10.0 });
        assert_eq!(check.bound(), Some(10.0));
    }

    #[test]
    fn unreachable_pair_is_unconstrained() {
        let mut store = triangle();
        store.add_node(NodeData::new("D", NodeKind::Endpoint)).unwrap();

        let check = EdgeValidator::new(&store).check(&id("A"), &id("D"), 1000.0);
        assert_eq!(check, ProposalCheck::Unconstrained);
        assert!(check.is_valid());
        // Unknown nodes are unconstrained too; the store reports them on insert.
        assert!(is_proposal_valid(&store, &id("A"), &id("ghost"), 1.0));
    }

    #[test]
    fn modification_sees_existing_link() {
        let store = triangle();
        // A-B is 5 directly; raising it above 5 is rejected because the
        // current cheapest route is that very link.
        assert!(is_proposal_valid(&store, &id("A"), &id("B"), 4.0));
        assert!(!is_proposal_valid(&store, &id("A"), &id("B"), 6.0));
    }
}
