//! Session layer for logicflow front ends.
//!
//! This crate is the single entry point an interaction layer talks to. It
//! owns the circuit, applies validated edits, re-runs propagation whenever a
//! signal value can change, and hands back owned snapshots for rendering.
//!
//! # Example
//!
//! ```
//! use lf_app::CircuitSession;
//! use lf_core::ComponentKind;
//! use lf_graph::Endpoint;
//!
//! let mut session = CircuitSession::new();
//! let a = session.add_component(ComponentKind::Input, (0.0, 0.0)).unwrap().value;
//! let out = session.add_component(ComponentKind::Output, (80.0, 0.0)).unwrap().value;
//! session
//!     .add_connection(Endpoint::output(a, 0), Endpoint::input(out, 0))
//!     .unwrap();
//!
//! let toggled = session.toggle_input(a).unwrap();
//! assert_eq!(toggled.snapshot.value_of(out), Some(true));
//! ```

pub mod error;
pub mod session;
pub mod snapshot;
pub mod truth_table;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use session::{BatchEdit, CircuitSession, Mutation, Phase};
pub use snapshot::{CircuitSnapshot, ComponentView, ConnectionView};
pub use truth_table::{MAX_TRUTH_TABLE_INPUTS, TruthRow, TruthTable, truth_table};
