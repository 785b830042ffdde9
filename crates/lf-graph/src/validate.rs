//! Graph integrity checks.

use std::collections::{BTreeMap, HashMap};

use lf_core::{CompId, ConnId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Component, Connection, Endpoint, PortDirection};

/// Validate that every connection references live ports of the right
/// direction and that the driver index agrees with the connection table.
pub(crate) fn validate_integrity(
    components: &BTreeMap<CompId, Component>,
    connections: &BTreeMap<ConnId, Connection>,
    drivers: &HashMap<Endpoint, ConnId>,
) -> GraphResult<()> {
    for conn in connections.values() {
        check_endpoint(components, conn.id, conn.source, PortDirection::Output)?;
        check_endpoint(components, conn.id, conn.target, PortDirection::Input)?;

        if conn.source.comp == conn.target.comp {
            return Err(GraphError::SelfLoop {
                comp: conn.source.comp,
            });
        }

        // Each target must be indexed back to this connection
        match drivers.get(&conn.target) {
            Some(&driver) if driver == conn.id => {}
            Some(&driver) => {
                return Err(GraphError::DuplicateDriver {
                    target: conn.target,
                    existing: driver,
                });
            }
            None => {
                return Err(GraphError::Dangling {
                    conn: conn.id,
                    endpoint: conn.target,
                });
            }
        }
    }

    // No stale entries left in the driver index
    for (&target, &conn) in drivers {
        if !connections.contains_key(&conn) {
            return Err(GraphError::Dangling {
                conn,
                endpoint: target,
            });
        }
    }

    Ok(())
}

fn check_endpoint(
    components: &BTreeMap<CompId, Component>,
    conn: ConnId,
    endpoint: Endpoint,
    expected: PortDirection,
) -> GraphResult<()> {
    let Some(comp) = components.get(&endpoint.comp) else {
        return Err(GraphError::Dangling { conn, endpoint });
    };
    if endpoint.port.direction != expected || comp.port(endpoint.port).is_none() {
        return Err(GraphError::InvalidEndpoint { endpoint, expected });
    }
    Ok(())
}
