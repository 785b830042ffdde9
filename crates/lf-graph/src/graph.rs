//! Core circuit data structures.

use core::fmt;
use std::collections::{BTreeMap, HashMap};

use lf_core::{CompId, ComponentKind, ConnId, IdAllocator, Position};

use crate::error::{GraphError, GraphResult};
use crate::validate;

/// Direction of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PortDirection {
    /// Receives a value from at most one connection.
    Input,
    /// Produces a value; may drive any number of connections.
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => f.write_str("input"),
            PortDirection::Output => f.write_str("output"),
        }
    }
}

/// Port identifier, unique within its component.
///
/// `slot` is 0-based within the direction, so an AND gate has `in0`, `in1`
/// and `out0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortId {
    pub direction: PortDirection,
    pub slot: u8,
}

impl PortId {
    pub const fn input(slot: u8) -> Self {
        Self {
            direction: PortDirection::Input,
            slot,
        }
    }

    pub const fn output(slot: u8) -> Self {
        Self {
            direction: PortDirection::Output,
            slot,
        }
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            PortDirection::Input => write!(f, "in{}", self.slot),
            PortDirection::Output => write!(f, "out{}", self.slot),
        }
    }
}

/// A typed connection point owned by exactly one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port {
    pub id: PortId,
    pub value: bool,
}

/// A `(component, port)` pair naming one end of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoint {
    pub comp: CompId,
    pub port: PortId,
}

impl Endpoint {
    pub fn new(comp: CompId, port: PortId) -> Self {
        Self { comp, port }
    }

    /// Shorthand for the `slot`-th output of `comp`.
    pub fn output(comp: CompId, slot: u8) -> Self {
        Self::new(comp, PortId::output(slot))
    }

    /// Shorthand for the `slot`-th input of `comp`.
    pub fn input(comp: CompId, slot: u8) -> Self {
        Self::new(comp, PortId::input(slot))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.comp, self.port)
    }
}

/// A component: a gate, an externally driven input, or a display output.
///
/// The port set is fixed by `kind` at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: CompId,
    pub kind: ComponentKind,
    pub position: Position,
    inputs: Vec<Port>,
    outputs: Vec<Port>,
}

impl Component {
    fn new(id: CompId, kind: ComponentKind, position: Position) -> Self {
        let inputs = (0..kind.input_count())
            .map(|slot| Port {
                id: PortId::input(slot as u8),
                value: false,
            })
            .collect();
        let outputs = (0..kind.output_count())
            .map(|slot| Port {
                id: PortId::output(slot as u8),
                value: false,
            })
            .collect();
        Self {
            id,
            kind,
            position,
            inputs,
            outputs,
        }
    }

    /// Input ports in port order.
    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    /// Output ports in port order.
    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    pub fn port(&self, id: PortId) -> Option<&Port> {
        let ports = match id.direction {
            PortDirection::Input => &self.inputs,
            PortDirection::Output => &self.outputs,
        };
        ports.get(id.slot as usize)
    }

    fn port_mut(&mut self, id: PortId) -> Option<&mut Port> {
        let ports = match id.direction {
            PortDirection::Input => &mut self.inputs,
            PortDirection::Output => &mut self.outputs,
        };
        ports.get_mut(id.slot as usize)
    }

    /// Current input values in port order.
    pub fn input_values(&self) -> Vec<bool> {
        self.inputs.iter().map(|p| p.value).collect()
    }

    /// Current output values in port order.
    pub fn output_values(&self) -> Vec<bool> {
        self.outputs.iter().map(|p| p.value).collect()
    }

    /// The value a front end shows for this component.
    ///
    /// OUTPUT mirrors its input; everything else shows its first output.
    pub fn display_value(&self) -> bool {
        match self.kind {
            ComponentKind::Output => self.inputs.first().is_some_and(|p| p.value),
            _ => self.outputs.first().is_some_and(|p| p.value),
        }
    }
}

/// A directed wire from an output port to an input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    pub id: ConnId,
    pub source: Endpoint,
    pub target: Endpoint,
}

/// Result of removing a component: the component and the connections that
/// were removed with it.
#[derive(Debug, Clone)]
pub struct RemovedComponent {
    pub component: Component,
    pub connections: Vec<Connection>,
}

/// The circuit: components and the connections between them.
///
/// Components and connections are kept in id order, so every iteration over
/// the graph is deterministic. The graph validates each mutation and never
/// computes signal values itself.
#[derive(Debug, Clone, Default)]
pub struct CircuitGraph {
    pub(crate) components: BTreeMap<CompId, Component>,
    pub(crate) connections: BTreeMap<ConnId, Connection>,

    /// Driven input endpoint -> the one connection driving it.
    pub(crate) drivers: HashMap<Endpoint, ConnId>,

    comp_ids: IdAllocator,
    conn_ids: IdAllocator,
}

impl CircuitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component of `kind`; all of its ports start at `false`.
    pub fn add_component(&mut self, kind: ComponentKind, position: Position) -> CompId {
        let id = self.comp_ids.allocate();
        self.components
            .insert(id, Component::new(id, kind, position));
        id
    }

    /// Remove a component and every connection touching it.
    pub fn remove_component(&mut self, id: CompId) -> GraphResult<RemovedComponent> {
        if !self.components.contains_key(&id) {
            return Err(GraphError::UnknownComponent { comp: id });
        }

        let attached: Vec<ConnId> = self.connections_of(id).map(|c| c.id).collect();
        let mut connections = Vec::with_capacity(attached.len());
        for conn in attached {
            connections.push(self.detach(conn)?);
        }

        let component = self
            .components
            .remove(&id)
            .ok_or(GraphError::UnknownComponent { comp: id })?;
        Ok(RemovedComponent {
            component,
            connections,
        })
    }

    /// Wire an output port to an input port.
    ///
    /// Checks run in this order: self-loop, endpoint resolution, duplicate
    /// pair, existing driver on the target.
    pub fn add_connection(&mut self, source: Endpoint, target: Endpoint) -> GraphResult<ConnId> {
        if source.comp == target.comp {
            return Err(GraphError::SelfLoop { comp: source.comp });
        }
        self.resolve(source, PortDirection::Output)?;
        self.resolve(target, PortDirection::Input)?;

        if let Some(&existing) = self.drivers.get(&target) {
            let same_source = self
                .connections
                .get(&existing)
                .is_some_and(|c| c.source == source);
            return Err(if same_source {
                GraphError::DuplicateConnection { existing }
            } else {
                GraphError::DuplicateDriver { target, existing }
            });
        }

        let id = self.conn_ids.allocate();
        self.connections.insert(id, Connection { id, source, target });
        self.drivers.insert(target, id);
        Ok(id)
    }

    /// Remove a connection; its target input falls back to `false`.
    pub fn remove_connection(&mut self, id: ConnId) -> GraphResult<Connection> {
        self.detach(id)
    }

    /// Flip the output of an INPUT component and return the new value.
    pub fn toggle_input(&mut self, id: CompId) -> GraphResult<bool> {
        let port = self.input_source_mut(id)?;
        port.value = !port.value;
        Ok(port.value)
    }

    /// Set the output of an INPUT component to `value`.
    pub fn set_input(&mut self, id: CompId, value: bool) -> GraphResult<()> {
        self.input_source_mut(id)?.value = value;
        Ok(())
    }

    /// Replace a component's position. Port values are untouched.
    pub fn update_position(&mut self, id: CompId, position: Position) -> GraphResult<()> {
        let comp = self
            .components
            .get_mut(&id)
            .ok_or(GraphError::UnknownComponent { comp: id })?;
        comp.position = position;
        Ok(())
    }

    /// Overwrite a single port value. Used by the propagation engine to
    /// publish its results.
    pub fn set_port_value(&mut self, endpoint: Endpoint, value: bool) -> GraphResult<()> {
        let port = self
            .components
            .get_mut(&endpoint.comp)
            .and_then(|c| c.port_mut(endpoint.port))
            .ok_or(GraphError::InvalidEndpoint {
                endpoint,
                expected: endpoint.port.direction,
            })?;
        port.value = value;
        Ok(())
    }

    /// Check structural integrity: every connection endpoint resolves and the
    /// one-driver-per-input index is consistent.
    pub fn validate(&self) -> GraphResult<()> {
        validate::validate_integrity(&self.components, &self.connections, &self.drivers)
    }

    /// Get a component by ID.
    pub fn component(&self, id: CompId) -> Option<&Component> {
        self.components.get(&id)
    }

    /// Get a connection by ID.
    pub fn connection(&self, id: ConnId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    /// All components in ascending id order.
    pub fn components(&self) -> impl Iterator<Item = &Component> + '_ {
        self.components.values()
    }

    /// All connections in ascending id order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.values()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components of one kind in ascending id order.
    pub fn components_of_kind(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> + '_ {
        self.components.values().filter(move |c| c.kind == kind)
    }

    /// Connections whose source or target is `comp`.
    pub fn connections_of(&self, comp: CompId) -> impl Iterator<Item = &Connection> + '_ {
        self.connections
            .values()
            .filter(move |c| c.source.comp == comp || c.target.comp == comp)
    }

    /// The connection driving an input endpoint, if any.
    pub fn driver_of(&self, target: Endpoint) -> Option<ConnId> {
        self.drivers.get(&target).copied()
    }

    /// Current value of any port.
    pub fn port_value(&self, endpoint: Endpoint) -> Option<bool> {
        self.components
            .get(&endpoint.comp)?
            .port(endpoint.port)
            .map(|p| p.value)
    }

    /// Look up `endpoint` and require it to have direction `expected`.
    fn resolve(&self, endpoint: Endpoint, expected: PortDirection) -> GraphResult<&Port> {
        let invalid = GraphError::InvalidEndpoint { endpoint, expected };
        if endpoint.port.direction != expected {
            return Err(invalid);
        }
        self.components
            .get(&endpoint.comp)
            .and_then(|c| c.port(endpoint.port))
            .ok_or(invalid)
    }

    fn input_source_mut(&mut self, id: CompId) -> GraphResult<&mut Port> {
        let comp = self
            .components
            .get_mut(&id)
            .ok_or(GraphError::UnknownComponent { comp: id })?;
        if comp.kind != ComponentKind::Input {
            return Err(GraphError::NotAnInput {
                comp: id,
                kind: comp.kind,
            });
        }
        comp.outputs
            .first_mut()
            .ok_or(GraphError::InvalidEndpoint {
                endpoint: Endpoint::output(id, 0),
                expected: PortDirection::Output,
            })
    }

    fn detach(&mut self, id: ConnId) -> GraphResult<Connection> {
        let conn = self
            .connections
            .remove(&id)
            .ok_or(GraphError::UnknownConnection { conn: id })?;
        self.drivers.remove(&conn.target);
        if let Some(port) = self
            .components
            .get_mut(&conn.target.comp)
            .and_then(|c| c.port_mut(conn.target.port))
        {
            port.value = false;
        }
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_origin(graph: &mut CircuitGraph, kind: ComponentKind) -> CompId {
        graph.add_component(kind, Position::default())
    }

    #[test]
    fn port_id_display() {
        assert_eq!(PortId::input(1).to_string(), "in1");
        assert_eq!(PortId::output(0).to_string(), "out0");
    }

    #[test]
    fn components_get_fixed_ports() {
        let mut graph = CircuitGraph::new();
        for kind in ComponentKind::ALL {
            let id = at_origin(&mut graph, kind);
            let comp = graph.component(id).unwrap();
            assert_eq!(comp.inputs().len(), kind.input_count());
            assert_eq!(comp.outputs().len(), kind.output_count());
            assert!(comp.inputs().iter().chain(comp.outputs()).all(|p| !p.value));
        }
    }

    #[test]
    fn ids_are_not_reused() {
        let mut graph = CircuitGraph::new();
        let a = at_origin(&mut graph, ComponentKind::And);
        graph.remove_component(a).unwrap();
        let b = at_origin(&mut graph, ComponentKind::And);
        assert_ne!(a, b);
    }

    #[test]
    fn toggle_flips_input() {
        let mut graph = CircuitGraph::new();
        let a = at_origin(&mut graph, ComponentKind::Input);
        assert_eq!(graph.toggle_input(a), Ok(true));
        assert_eq!(graph.port_value(Endpoint::output(a, 0)), Some(true));
        assert_eq!(graph.toggle_input(a), Ok(false));
    }

    #[test]
    fn toggle_rejects_gates() {
        let mut graph = CircuitGraph::new();
        let g = at_origin(&mut graph, ComponentKind::Nor);
        assert_eq!(
            graph.toggle_input(g),
            Err(GraphError::NotAnInput {
                comp: g,
                kind: ComponentKind::Nor
            })
        );
    }

    #[test]
    fn removing_connection_releases_target() {
        let mut graph = CircuitGraph::new();
        let a = at_origin(&mut graph, ComponentKind::Input);
        let n = at_origin(&mut graph, ComponentKind::Not);
        let c = graph
            .add_connection(Endpoint::output(a, 0), Endpoint::input(n, 0))
            .unwrap();
        graph.set_port_value(Endpoint::input(n, 0), true).unwrap();

        let removed = graph.remove_connection(c).unwrap();
        assert_eq!(removed.id, c);
        assert_eq!(graph.port_value(Endpoint::input(n, 0)), Some(false));
        assert_eq!(graph.driver_of(Endpoint::input(n, 0)), None);
    }

    #[test]
    fn position_update_leaves_values() {
        let mut graph = CircuitGraph::new();
        let a = at_origin(&mut graph, ComponentKind::Input);
        graph.toggle_input(a).unwrap();
        graph.update_position(a, Position::new(4.0, -2.5)).unwrap();
        let comp = graph.component(a).unwrap();
        assert_eq!(comp.position, Position::new(4.0, -2.5));
        assert!(comp.display_value());
    }
}
