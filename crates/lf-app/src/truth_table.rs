//! Truth-table enumeration over a whole circuit.

use std::fmt;

use lf_core::{CompId, ComponentKind};
use lf_gates::combinations;
use lf_solver::{PropagationConfig, SettleStatus, StartState, propagate};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::session::CircuitSession;

/// Largest number of INPUT components `truth_table` will enumerate.
pub const MAX_TRUTH_TABLE_INPUTS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthRow {
    /// One level per INPUT, in the table's input order.
    pub inputs: Vec<bool>,
    /// One display value per OUTPUT, in the table's output order.
    pub outputs: Vec<bool>,
    pub status: SettleStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthTable {
    pub inputs: Vec<CompId>,
    pub outputs: Vec<CompId>,
    pub rows: Vec<TruthRow>,
}

impl TruthTable {
    /// Whether every row converged.
    pub fn settled(&self) -> bool {
        self.rows.iter().all(|r| r.status == SettleStatus::Converged)
    }
}

/// Enumerate every combination of INPUT levels and record each OUTPUT.
///
/// INPUTs are ordered by id with the first one most significant, so row `n`
/// spells `n` in binary. Runs on a scratch copy of the circuit with a cold
/// start per row; the session itself is not modified.
pub fn truth_table(session: &CircuitSession) -> AppResult<TruthTable> {
    let graph = session.graph();
    let inputs: Vec<CompId> = graph
        .components_of_kind(ComponentKind::Input)
        .map(|c| c.id)
        .collect();
    if inputs.len() > MAX_TRUTH_TABLE_INPUTS {
        return Err(AppError::TooManyInputs {
            count: inputs.len(),
            max: MAX_TRUTH_TABLE_INPUTS,
        });
    }
    let outputs: Vec<CompId> = graph
        .components_of_kind(ComponentKind::Output)
        .map(|c| c.id)
        .collect();

    let config = PropagationConfig {
        start: StartState::Cold,
        ..session.config().clone()
    };
    let mut scratch = graph.clone();
    let mut rows = Vec::with_capacity(1 << inputs.len());

    for levels in combinations(inputs.len()) {
        for (&id, &level) in inputs.iter().zip(&levels) {
            scratch.set_input(id, level)?;
        }
        let run = propagate(&mut scratch, &config)?;
        let values = outputs
            .iter()
            .map(|&id| scratch.component(id).is_some_and(|c| c.display_value()))
            .collect();
        rows.push(TruthRow {
            inputs: levels,
            outputs: values,
            status: run.status,
        });
    }

    Ok(TruthTable {
        inputs,
        outputs,
        rows,
    })
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let in_labels: Vec<String> = self.inputs.iter().map(|id| format!("#{id}")).collect();
        let out_labels: Vec<String> = self.outputs.iter().map(|id| format!("#{id}")).collect();

        writeln!(f, "{} | {}", in_labels.join(" "), out_labels.join(" "))?;
        for row in &self.rows {
            let cells = |labels: &[String], values: &[bool]| -> Vec<String> {
                labels
                    .iter()
                    .zip(values)
                    .map(|(label, &v)| format!("{:>width$}", u8::from(v), width = label.len()))
                    .collect()
            };
            write!(
                f,
                "{} | {}",
                cells(&in_labels, &row.inputs).join(" "),
                cells(&out_labels, &row.outputs).join(" ")
            )?;
            if row.status == SettleStatus::CappedAtIterationLimit {
                write!(f, "  (unsettled)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
