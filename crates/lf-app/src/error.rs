//! Error types for the lf-app session layer.

use lf_graph::GraphError;
use lf_solver::SolverError;

/// Application error type wrapping the graph and solver layers, so a front
/// end matches on one enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Truth table over {count} inputs exceeds the limit of {max}")]
    TooManyInputs { count: usize, max: usize },
}

/// Result type for lf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The underlying structural error, if this is one.
    pub fn as_graph(&self) -> Option<&GraphError> {
        match self {
            AppError::Graph(err) => Some(err),
            _ => None,
        }
    }
}
