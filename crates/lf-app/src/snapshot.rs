//! Read-only render views of a circuit.
//!
//! Snapshots are owned copies: holding one never borrows the session, and
//! changes always go back through `CircuitSession`.

use lf_core::{CompId, ComponentKind, ConnId, Position};
use lf_graph::{CircuitGraph, Component, Connection, Endpoint};
use lf_solver::Propagation;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentView {
    pub id: CompId,
    pub kind: ComponentKind,
    pub position: Position,
    pub inputs: Vec<bool>,
    pub outputs: Vec<bool>,
}

impl ComponentView {
    fn from_component(comp: &Component) -> Self {
        Self {
            id: comp.id,
            kind: comp.kind,
            position: comp.position,
            inputs: comp.input_values(),
            outputs: comp.output_values(),
        }
    }

    /// Lamp value: OUTPUT mirrors its input, everything else shows its
    /// first output.
    pub fn value(&self) -> bool {
        let ports = match self.kind {
            ComponentKind::Output => &self.inputs,
            _ => &self.outputs,
        };
        ports.first().copied().unwrap_or(false)
    }
}

/// A wire and the signal it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionView {
    pub id: ConnId,
    pub source: Endpoint,
    pub target: Endpoint,
    pub value: bool,
}

impl ConnectionView {
    fn from_connection(graph: &CircuitGraph, conn: &Connection) -> Self {
        Self {
            id: conn.id,
            source: conn.source,
            target: conn.target,
            value: graph.port_value(conn.source).unwrap_or(false),
        }
    }
}

/// Everything a front end needs to draw the circuit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitSnapshot {
    pub components: Vec<ComponentView>,
    pub connections: Vec<ConnectionView>,
    /// Report of the most recent propagation, if any has run.
    pub last_run: Option<Propagation>,
}

impl CircuitSnapshot {
    pub fn capture(graph: &CircuitGraph, last_run: Option<&Propagation>) -> Self {
        Self {
            components: graph.components().map(ComponentView::from_component).collect(),
            connections: graph
                .connections()
                .map(|c| ConnectionView::from_connection(graph, c))
                .collect(),
            last_run: last_run.cloned(),
        }
    }

    pub fn component(&self, id: CompId) -> Option<&ComponentView> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn connection(&self, id: ConnId) -> Option<&ConnectionView> {
        self.connections.iter().find(|c| c.id == id)
    }

    /// Display value of a component, `None` if it does not exist.
    pub fn value_of(&self, id: CompId) -> Option<bool> {
        self.component(id).map(ComponentView::value)
    }

    /// OUTPUT components in id order.
    pub fn outputs(&self) -> impl Iterator<Item = &ComponentView> + '_ {
        self.components
            .iter()
            .filter(|c| c.kind == ComponentKind::Output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_copies_ports_and_wire_values() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_component(ComponentKind::Input, Position::new(10.0, 20.0));
        let o = graph.add_component(ComponentKind::Output, Position::default());
        let c = graph
            .add_connection(Endpoint::output(a, 0), Endpoint::input(o, 0))
            .unwrap();
        graph.toggle_input(a).unwrap();

        let snap = CircuitSnapshot::capture(&graph, None);
        assert_eq!(snap.components.len(), 2);
        assert_eq!(snap.component(a).unwrap().position, Position::new(10.0, 20.0));
        assert_eq!(snap.value_of(a), Some(true));
        // Not propagated yet
        assert_eq!(snap.value_of(o), Some(false));
        assert!(snap.connection(c).unwrap().value);
        assert!(snap.last_run.is_none());
        assert_eq!(snap.outputs().count(), 1);
    }
}
