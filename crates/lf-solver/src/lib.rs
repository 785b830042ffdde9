//! Signal propagation engine for logicflow circuits.
//!
//! This crate computes steady-state port values for a `CircuitGraph` by
//! fixpoint iteration: each pass copies every connection's source value onto
//! its target input, then re-evaluates every gate. Runs stop when a pass
//! changes nothing or when the pass cap is reached; feedback loops that never
//! settle end in `SettleStatus::CappedAtIterationLimit` rather than hanging.

pub mod config;
pub mod error;
pub(crate) mod plan;
pub mod propagate;

pub use config::{PropagationConfig, StartState};
pub use error::{SolverError, SolverResult};
pub use propagate::{Propagation, SettleStatus, propagate};
