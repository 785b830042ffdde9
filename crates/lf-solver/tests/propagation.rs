//! Integration tests for the propagation engine.

use lf_core::{CompId, ComponentKind, Position};
use lf_graph::{CircuitGraph, Endpoint};
use lf_solver::{PropagationConfig, SettleStatus, StartState, propagate};

fn add(graph: &mut CircuitGraph, kind: ComponentKind) -> CompId {
    graph.add_component(kind, Position::default())
}

fn wire(graph: &mut CircuitGraph, from: CompId, to: CompId, slot: u8) {
    graph
        .add_connection(Endpoint::output(from, 0), Endpoint::input(to, slot))
        .unwrap();
}

fn out(graph: &CircuitGraph, comp: CompId) -> bool {
    graph.component(comp).unwrap().display_value()
}

/// Snapshot of every port value, in id order.
fn port_state(graph: &CircuitGraph) -> Vec<(Vec<bool>, Vec<bool>)> {
    graph
        .components()
        .map(|c| (c.input_values(), c.output_values()))
        .collect()
}

/// NOT -> AND.in0, AND -> NOT, enable -> AND.in1.
fn gated_ring(enable: bool) -> (CircuitGraph, CompId, CompId) {
    let mut graph = CircuitGraph::new();
    let en = add(&mut graph, ComponentKind::Input);
    let not = add(&mut graph, ComponentKind::Not);
    let and = add(&mut graph, ComponentKind::And);
    wire(&mut graph, not, and, 0);
    wire(&mut graph, en, and, 1);
    wire(&mut graph, and, not, 0);
    graph.set_input(en, enable).unwrap();
    (graph, not, and)
}

#[test]
fn fan_out_delivers_identical_values() {
    let mut graph = CircuitGraph::new();
    let a = add(&mut graph, ComponentKind::Input);
    let n1 = add(&mut graph, ComponentKind::Not);
    let n2 = add(&mut graph, ComponentKind::Or);
    wire(&mut graph, a, n1, 0);
    wire(&mut graph, a, n2, 1);
    graph.toggle_input(a).unwrap();

    let run = propagate(&mut graph, &PropagationConfig::default()).unwrap();
    assert!(run.converged());
    assert_eq!(graph.port_value(Endpoint::input(n1, 0)), Some(true));
    assert_eq!(graph.port_value(Endpoint::input(n2, 1)), Some(true));
}

#[test]
fn chain_converges_within_its_depth() {
    // IN -> NOT x8 -> OUT: depth 9
    let mut graph = CircuitGraph::new();
    let input = add(&mut graph, ComponentKind::Input);
    let mut prev = input;
    for _ in 0..8 {
        let n = add(&mut graph, ComponentKind::Not);
        wire(&mut graph, prev, n, 0);
        prev = n;
    }
    let output = add(&mut graph, ComponentKind::Output);
    wire(&mut graph, prev, output, 0);
    graph.toggle_input(input).unwrap();

    let run = propagate(&mut graph, &PropagationConfig::default()).unwrap();
    assert_eq!(run.status, SettleStatus::Converged);
    assert!(run.passes <= 9, "took {} passes", run.passes);
    // Eight inversions of true
    assert!(out(&graph, output));
}

#[test]
fn adaptive_cap_covers_long_chains() {
    // A chain longer than the default floor must still converge
    let mut graph = CircuitGraph::new();
    let input = add(&mut graph, ComponentKind::Input);
    let mut prev = input;
    for _ in 0..40 {
        let n = add(&mut graph, ComponentKind::Not);
        wire(&mut graph, prev, n, 0);
        prev = n;
    }
    let run = propagate(&mut graph, &PropagationConfig::default()).unwrap();
    assert!(run.converged());
    assert_eq!(run.cap, 42);
    assert_eq!(run.passes, 40);
}

#[test]
fn undersized_fixed_cap_is_reported() {
    let mut graph = CircuitGraph::new();
    let input = add(&mut graph, ComponentKind::Input);
    let mut prev = input;
    for _ in 0..6 {
        let n = add(&mut graph, ComponentKind::Not);
        wire(&mut graph, prev, n, 0);
        prev = n;
    }
    let run = propagate(&mut graph, &PropagationConfig::fixed(3)).unwrap();
    assert_eq!(run.status, SettleStatus::CappedAtIterationLimit);
    assert_eq!(run.passes, 3);
}

#[test]
fn oscillating_ring_terminates_at_cap() {
    let (mut graph, not, and) = gated_ring(true);
    let run = propagate(&mut graph, &PropagationConfig::default()).unwrap();

    assert_eq!(run.status, SettleStatus::CappedAtIterationLimit);
    assert_eq!(run.passes, run.cap);
    assert!(!run.unsettled.is_empty());
    assert!(
        run.unsettled
            .iter()
            .all(|id| *id == not || *id == and)
    );
}

#[test]
fn capped_state_is_deterministic() {
    let (mut g1, ..) = gated_ring(true);
    let (mut g2, ..) = gated_ring(true);
    let cfg = PropagationConfig::fixed(7);
    let r1 = propagate(&mut g1, &cfg).unwrap();
    let r2 = propagate(&mut g2, &cfg).unwrap();
    assert_eq!(r1, r2);
    assert_eq!(port_state(&g1), port_state(&g2));
}

#[test]
fn disabled_ring_settles() {
    let (mut graph, not, and) = gated_ring(false);
    let run = propagate(&mut graph, &PropagationConfig::default()).unwrap();
    assert!(run.converged());
    assert!(out(&graph, not));
    assert!(!out(&graph, and));
}

#[test]
fn repeated_runs_are_identical() {
    for enable in [false, true] {
        let (mut graph, ..) = gated_ring(enable);
        let cfg = PropagationConfig::default();
        let first = propagate(&mut graph, &cfg).unwrap();
        let state = port_state(&graph);
        let second = propagate(&mut graph, &cfg).unwrap();
        assert_eq!(first, second);
        assert_eq!(state, port_state(&graph));
    }
}

#[test]
fn warm_start_continues_from_current_values() {
    let (mut graph, ..) = gated_ring(true);
    let cfg = PropagationConfig {
        max_passes: Some(3),
        start: StartState::Warm,
        ..PropagationConfig::default()
    };
    propagate(&mut graph, &cfg).unwrap();
    let after_three = port_state(&graph);
    propagate(&mut graph, &cfg).unwrap();
    // An oscillator keeps moving when resumed
    assert_ne!(after_three, port_state(&graph));
}

#[test]
fn removal_then_propagate_is_clean() {
    let mut graph = CircuitGraph::new();
    let a = add(&mut graph, ComponentKind::Input);
    let g = add(&mut graph, ComponentKind::Xor);
    let o = add(&mut graph, ComponentKind::Output);
    wire(&mut graph, a, g, 0);
    wire(&mut graph, g, o, 0);
    graph.toggle_input(a).unwrap();
    propagate(&mut graph, &PropagationConfig::default()).unwrap();
    assert!(out(&graph, o));

    graph.remove_component(a).unwrap();
    assert_eq!(graph.connections_of(a).count(), 0);
    let run = propagate(&mut graph, &PropagationConfig::default()).unwrap();
    assert!(run.converged());
    assert!(!out(&graph, o));
}

#[test]
fn and_gate_end_to_end() {
    let mut graph = CircuitGraph::new();
    let a = add(&mut graph, ComponentKind::Input);
    let b = add(&mut graph, ComponentKind::Input);
    let and = add(&mut graph, ComponentKind::And);
    let o = add(&mut graph, ComponentKind::Output);
    let a_wire = graph
        .add_connection(Endpoint::output(a, 0), Endpoint::input(and, 0))
        .unwrap();
    wire(&mut graph, b, and, 1);
    wire(&mut graph, and, o, 0);
    let cfg = PropagationConfig::default();

    graph.set_input(a, true).unwrap();
    propagate(&mut graph, &cfg).unwrap();
    assert!(!out(&graph, o));

    graph.toggle_input(b).unwrap();
    propagate(&mut graph, &cfg).unwrap();
    assert!(out(&graph, o));

    graph.remove_connection(a_wire).unwrap();
    propagate(&mut graph, &cfg).unwrap();
    assert_eq!(graph.port_value(Endpoint::input(and, 0)), Some(false));
    assert!(!out(&graph, o));
}
