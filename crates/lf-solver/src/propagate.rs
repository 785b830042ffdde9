//! Fixpoint propagation over a circuit graph.

use lf_core::CompId;
use lf_graph::CircuitGraph;
use tracing::{debug, trace, warn};

use crate::config::PropagationConfig;
use crate::error::SolverResult;
use crate::plan::Plan;

/// Terminal state of a propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SettleStatus {
    /// A full pass changed nothing.
    Converged,
    /// The pass cap was reached while values were still changing, which
    /// means the circuit contains a feedback loop that does not settle.
    CappedAtIterationLimit,
}

/// Report of one propagation run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Propagation {
    pub status: SettleStatus,
    /// Passes that changed at least one port. The quiet pass that confirms
    /// convergence is not counted.
    pub passes: usize,
    /// Pass cap in force for this run
    pub cap: usize,
    /// Components still changing in the final pass (empty when converged).
    pub unsettled: Vec<CompId>,
}

impl Propagation {
    pub fn converged(&self) -> bool {
        self.status == SettleStatus::Converged
    }
}

/// Propagate signal values through `graph` until a fixpoint or the pass cap.
///
/// This function:
/// 1. Validates the graph and compiles it into a dense plan
/// 2. Applies the configured start state and pins undriven inputs low
/// 3. Repeats passes (connection transfers, then gate evaluation) until a
///    pass changes nothing or the cap is reached
/// 4. Writes every port value back onto the graph in one step
///
/// The graph is left untouched if compilation fails.
pub fn propagate(
    graph: &mut CircuitGraph,
    config: &PropagationConfig,
) -> SolverResult<Propagation> {
    let mut plan = Plan::compile(graph)?;
    let cap = config.pass_cap(plan.comp_count());
    plan.reset(config.start);

    let mut touched = vec![false; plan.comp_count()];
    let mut passes = 0;
    let mut converged = false;

    for pass in 1..=cap {
        let changed = plan.pass(&mut touched);
        trace!(pass, changed, "propagation pass");
        if !changed {
            converged = true;
            break;
        }
        passes += 1;
    }

    plan.write_back(graph)?;

    let report = if converged {
        Propagation {
            status: SettleStatus::Converged,
            passes,
            cap,
            unsettled: Vec::new(),
        }
    } else {
        let unsettled = plan.touched_ids(&touched);
        warn!(cap, ?unsettled, "propagation hit the pass cap");
        Propagation {
            status: SettleStatus::CappedAtIterationLimit,
            passes,
            cap,
            unsettled,
        }
    };
    debug!(status = ?report.status, passes, cap, "propagation finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_core::{ComponentKind, Position};
    use lf_graph::Endpoint;

    #[test]
    fn empty_graph_converges_immediately() {
        let mut graph = CircuitGraph::new();
        let run = propagate(&mut graph, &PropagationConfig::default()).unwrap();
        assert_eq!(run.status, SettleStatus::Converged);
        assert_eq!(run.passes, 0);
    }

    #[test]
    fn lone_not_gate_outputs_true() {
        let mut graph = CircuitGraph::new();
        let n = graph.add_component(ComponentKind::Not, Position::default());
        let run = propagate(&mut graph, &PropagationConfig::default()).unwrap();
        assert!(run.converged());
        assert_eq!(run.passes, 1);
        assert_eq!(graph.port_value(Endpoint::output(n, 0)), Some(true));
    }

    #[test]
    fn cap_of_one_reports_capped() {
        let mut graph = CircuitGraph::new();
        graph.add_component(ComponentKind::Not, Position::default());
        let run = propagate(&mut graph, &PropagationConfig::fixed(1)).unwrap();
        assert_eq!(run.status, SettleStatus::CappedAtIterationLimit);
        assert_eq!(run.cap, 1);
        assert_eq!(run.unsettled.len(), 1);
    }
}
