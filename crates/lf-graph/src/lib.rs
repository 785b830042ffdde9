//! lf-graph: circuit graph layer for logicflow.
//!
//! Provides:
//! - Core circuit data structures (Component, Port, Connection, CircuitGraph)
//! - Validated structural mutations with the error taxonomy callers match on
//! - Stable indexing for solver integration
//!
//! # Example
//!
//! ```
//! use lf_core::{ComponentKind, Position};
//! use lf_graph::{CircuitGraph, Endpoint};
//!
//! let mut graph = CircuitGraph::new();
//! let a = graph.add_component(ComponentKind::Input, Position::default());
//! let n = graph.add_component(ComponentKind::Not, Position::default());
//! graph
//!     .add_connection(Endpoint::output(a, 0), Endpoint::input(n, 0))
//!     .unwrap();
//!
//! assert_eq!(graph.component_count(), 2);
//! assert_eq!(graph.connection_count(), 1);
//! ```

pub mod error;
pub mod graph;
pub mod indexing;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use error::{GraphError, GraphResult};
pub use graph::{
    CircuitGraph, Component, Connection, Endpoint, Port, PortDirection, PortId, RemovedComponent,
};
pub use indexing::IndexMap;
