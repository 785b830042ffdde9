//! Error types for propagation.

use lf_graph::GraphError;
use thiserror::Error;

/// Errors raised while compiling or publishing a propagation run.
///
/// Non-convergence is not an error; see `SettleStatus`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type SolverResult<T> = Result<T, SolverError>;
