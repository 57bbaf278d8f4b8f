//! End-to-end: simulator report -> segments -> schedule -> subscribers.

use qnet_core::highlight::{HighlightAction, HighlightColor};
use qnet_core::segment::Segment;
use qnet_core::types::*;
use qnet_runtime::events::TopologyEvent;
use qnet_runtime::network::Network;
use qnet_runtime::outcome::{interpret, interpret_operations, ConnectionResult, Operation, OperationStatus};
use qnet_runtime::schedule::compile;
use std::sync::{Arc, Mutex};

fn ids(names: &[&str]) -> Vec<NodeId> {
    names.iter().map(|s| NodeId::from(*s)).collect()
}

#[test]
fn failed_swap_over_four_node_path() {
    let path = ids(&["X", "Y", "Z", "W"]);
    let ops = vec![Operation::swap(["X", "Y"], ["Z", "W"], OperationStatus::Failed)];

    assert_eq!(
        interpret_operations(&path, &ops),
        vec![Segment::failed_swap("X", "Y"), Segment::failed_swap("Y", "Z")]
    );
}

#[test]
fn grouped_failures_share_offset_and_fade_later() {
    let schedule = compile(&[
        Segment::failed_swap("A", "B"),
        Segment::failed_swap("B", "C"),
        Segment::success("C", "D"),
    ]);

    let sets: Vec<_> = schedule
        .instructions()
        .iter()
        .filter(|i| i.action == HighlightAction::Set)
        .collect();
    assert_eq!(sets[0].start_offset_ms, 1000);
    assert_eq!(sets[1].start_offset_ms, 1000);
    assert_eq!(sets[2].start_offset_ms, 3000);
    assert_eq!(sets[2].color, HighlightColor::Success);

    for set in sets {
        let fade = schedule
            .instructions()
            .iter()
            .find(|i| i.action == HighlightAction::FadeToNeutral && i.targets(&set.from, &set.to))
            .unwrap();
        assert_eq!(fade.start_offset_ms, set.start_offset_ms + 1000);
    }
}

#[test]
fn simulator_report_drives_listeners() {
    let report = r#"{
        "path": ["alice", "r1", "r2", "bob"],
        "operations": [
            {"type": "link_generation", "status": "success", "nodes": ["alice", "r1"]},
            {"type": "link_generation", "status": "failed", "nodes": ["r1", "r2"]},
            {"type": "link_generation", "status": "success", "nodes": ["r2", "bob"]},
            {"type": "swap", "status": "failed", "inputs": [["alice", "r1"], ["r2", "bob"]]}
        ]
    }"#;
    let result: ConnectionResult = serde_json::from_str(report).unwrap();
    assert_eq!(interpret(&result).len(), 5);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut network = Network::new();
    let sink = seen.clone();
    network.register(move |event: &TopologyEvent| {
        if let TopologyEvent::PathHighlighted { schedule } = event {
            sink.lock().unwrap().push(schedule.clone());
        }
    });
    let rx = network.subscribe();

    let schedule = network.highlight(&result);
    // three singles at 0/700/1400, settle at 2100 -> run at 3100
    let offsets: Vec<u64> = schedule
        .instructions()
        .iter()
        .filter(|i| i.action == HighlightAction::Set)
        .map(|i| i.start_offset_ms)
        .collect();
    assert_eq!(offsets, vec![0, 700, 1400, 3100, 3100]);
    assert_eq!(schedule.total_duration_ms(), 3100 + 1000 + 2500);

    assert_eq!(seen.lock().unwrap().as_slice(), &[schedule.clone()]);
    assert_eq!(rx.try_recv().unwrap(), TopologyEvent::PathHighlighted { schedule });
}

#[test]
fn events_arrive_in_mutation_order() {
    let mut network = Network::new();
    let rx = network.subscribe();
    let a = NodeId::from("a");
    let b = NodeId::from("b");

    network.add_node(a.clone(), NodeKind::Endpoint).unwrap();
    network.add_node(b.clone(), NodeKind::Endpoint).unwrap();
    network.add_link(&a, &b, 1.0).unwrap();
    let _ = network.add_link(&a, &b, 2.0);
    network.remove_link(&b, &a).unwrap();
    network.clear();

    let kinds: Vec<&'static str> = rx
        .try_iter()
        .map(|e| match e {
            TopologyEvent::NodeAdded { .. } => "node_added",
            TopologyEvent::LinkAdded { .. } => "link_added",
            TopologyEvent::LinkRemoved { .. } => "link_removed",
            TopologyEvent::Cleared => "cleared",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["node_added", "node_added", "link_added", "link_removed", "cleared"]
    );
}
