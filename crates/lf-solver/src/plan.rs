//! Dense evaluation plan compiled from a circuit graph.
//!
//! All port values live in one flat `Vec<bool>` indexed through `IndexMap`;
//! connections become slot-to-slot transfers and gates become slot ranges.

use core::ops::Range;

use lf_core::ComponentKind;
use lf_gates::evaluate;
use lf_graph::{CircuitGraph, Endpoint, IndexMap, PortId};

use crate::config::StartState;
use crate::error::SolverResult;

/// Copy of one connection's value from an output slot to an input slot.
#[derive(Debug, Clone, Copy)]
struct Transfer {
    from: usize,
    to: usize,
    /// Component index owning `to`.
    owner: usize,
}

#[derive(Debug, Clone)]
struct GateStep {
    comp: usize,
    kind: ComponentKind,
    inputs: Range<usize>,
    outputs: Range<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct Plan {
    index: IndexMap,
    values: Vec<bool>,
    transfers: Vec<Transfer>,
    gates: Vec<GateStep>,
    /// Input slots with no driving connection; held at `false`.
    undriven: Vec<usize>,
    /// Slots whose value is computed (everything but INPUT outputs).
    derived: Vec<usize>,
}

impl Plan {
    /// Validate the graph and lay it out densely.
    pub(crate) fn compile(graph: &CircuitGraph) -> SolverResult<Self> {
        graph.validate()?;

        let index = IndexMap::from_graph(graph);
        let mut values = vec![false; index.slot_count()];
        let mut gates = Vec::new();
        let mut derived = Vec::new();
        let mut driven = vec![false; index.slot_count()];

        for (i, comp) in graph.components().enumerate() {
            let inputs = index.input_slots(i);
            let outputs = index.output_slots(i);

            for (slot, port) in inputs.clone().zip(comp.inputs()) {
                values[slot] = port.value;
            }
            for (slot, port) in outputs.clone().zip(comp.outputs()) {
                values[slot] = port.value;
            }

            derived.extend(inputs.clone());
            if comp.kind != ComponentKind::Input {
                derived.extend(outputs.clone());
            }
            if comp.kind.is_gate() {
                gates.push(GateStep {
                    comp: i,
                    kind: comp.kind,
                    inputs,
                    outputs,
                });
            }
        }

        let mut transfers = Vec::with_capacity(graph.connection_count());
        for conn in graph.connections() {
            let from = index.slot(conn.source)?;
            let to = index.slot(conn.target)?;
            driven[to] = true;
            transfers.push(Transfer {
                from,
                to,
                owner: index.slot_owner(to),
            });
        }

        let undriven = (0..index.comp_count())
            .flat_map(|i| index.input_slots(i))
            .filter(|&slot| !driven[slot])
            .collect();

        Ok(Self {
            index,
            values,
            transfers,
            gates,
            undriven,
            derived,
        })
    }

    pub(crate) fn comp_count(&self) -> usize {
        self.index.comp_count()
    }

    /// Apply the start state and pin undriven inputs low.
    pub(crate) fn reset(&mut self, start: StartState) {
        if start == StartState::Cold {
            for &slot in &self.derived {
                self.values[slot] = false;
            }
        }
        for &slot in &self.undriven {
            self.values[slot] = false;
        }
    }

    /// Run one propagation pass: every transfer, then every gate.
    ///
    /// Transfers only read outputs and write inputs; gates only read their own
    /// inputs and write their own outputs. The pass is therefore independent
    /// of the order of either list. `touched[i]` is set for every component
    /// with a port changed in this pass. Returns whether anything changed.
    pub(crate) fn pass(&mut self, touched: &mut [bool]) -> bool {
        touched.fill(false);
        let mut changed = false;

        for t in &self.transfers {
            let v = self.values[t.from];
            if self.values[t.to] != v {
                self.values[t.to] = v;
                touched[t.owner] = true;
                changed = true;
            }
        }

        for g in &self.gates {
            let Some(out) = evaluate(g.kind, &self.values[g.inputs.clone()]) else {
                continue;
            };
            for slot in g.outputs.clone() {
                if self.values[slot] != out {
                    self.values[slot] = out;
                    touched[g.comp] = true;
                    changed = true;
                }
            }
        }

        changed
    }

    /// Component ids flagged in `touched`.
    pub(crate) fn touched_ids(&self, touched: &[bool]) -> Vec<lf_core::CompId> {
        touched
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t)
            .map(|(i, _)| self.index.comp_id(i))
            .collect()
    }

    /// Publish the working values back onto the graph's ports.
    pub(crate) fn write_back(&self, graph: &mut CircuitGraph) -> SolverResult<()> {
        for i in 0..self.index.comp_count() {
            let comp = self.index.comp_id(i);
            let inputs = self.index.input_slots(i);
            let outputs = self.index.output_slots(i);

            for (k, slot) in inputs.clone().enumerate() {
                let endpoint = Endpoint::new(comp, PortId::input(k as u8));
                graph.set_port_value(endpoint, self.values[slot])?;
            }
            for (k, slot) in outputs.enumerate() {
                let endpoint = Endpoint::new(comp, PortId::output(k as u8));
                graph.set_port_value(endpoint, self.values[slot])?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_core::Position;

    #[test]
    fn compile_lays_out_transfers_and_gates() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_component(ComponentKind::Input, Position::default());
        let n = graph.add_component(ComponentKind::Not, Position::default());
        let o = graph.add_component(ComponentKind::Output, Position::default());
        graph
            .add_connection(Endpoint::output(a, 0), Endpoint::input(n, 0))
            .unwrap();
        graph
            .add_connection(Endpoint::output(n, 0), Endpoint::input(o, 0))
            .unwrap();

        let plan = Plan::compile(&graph).unwrap();
        assert_eq!(plan.comp_count(), 3);
        assert_eq!(plan.transfers.len(), 2);
        assert_eq!(plan.gates.len(), 1);
        assert!(plan.undriven.is_empty());
        // NOT in/out and OUTPUT in; the INPUT's output is not derived
        assert_eq!(plan.derived.len(), 3);
    }

    #[test]
    fn undriven_inputs_are_pinned_low() {
        let mut graph = CircuitGraph::new();
        let g = graph.add_component(ComponentKind::Nand, Position::default());
        graph.set_port_value(Endpoint::input(g, 0), true).unwrap();
        graph.set_port_value(Endpoint::input(g, 1), true).unwrap();

        let mut plan = Plan::compile(&graph).unwrap();
        assert_eq!(plan.undriven.len(), 2);
        plan.reset(StartState::Warm);
        let mut touched = vec![false; plan.comp_count()];
        assert!(plan.pass(&mut touched));
        // NAND(false, false) = true
        assert!(plan.values[2]);
        assert_eq!(plan.touched_ids(&touched), vec![g]);
    }
}
