//! Graph-specific error types.

use lf_core::{CompId, ComponentKind, ConnId};
use thiserror::Error;

use crate::graph::{Endpoint, PortDirection};

pub type GraphResult<T> = Result<T, GraphError>;

/// Structural validation errors.
///
/// Every rejected mutation reports one of these; none of them leave the graph
/// modified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No component with this id exists.
    #[error("Component {comp} does not exist")]
    UnknownComponent { comp: CompId },

    /// No connection with this id exists.
    #[error("Connection {conn} does not exist")]
    UnknownConnection { conn: ConnId },

    /// The endpoint does not resolve to a port of the expected direction.
    #[error("Endpoint {endpoint} does not resolve to an {expected} port")]
    InvalidEndpoint {
        endpoint: Endpoint,
        expected: PortDirection,
    },

    /// A connection from a component back to itself.
    #[error("Component {comp} cannot be connected to itself")]
    SelfLoop { comp: CompId },

    /// The same source/target pair is already wired.
    #[error("Connection {existing} already joins these ports")]
    DuplicateConnection { existing: ConnId },

    /// The target input port is already driven by another connection.
    #[error("Input {target} is already driven by connection {existing}")]
    DuplicateDriver { target: Endpoint, existing: ConnId },

    /// Only INPUT components can be toggled.
    #[error("Component {comp} is {kind}, not INPUT")]
    NotAnInput { comp: CompId, kind: ComponentKind },

    /// Integrity check failure: a connection references something missing.
    #[error("Connection {conn} references missing endpoint {endpoint}")]
    Dangling { conn: ConnId, endpoint: Endpoint },
}
