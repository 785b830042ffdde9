//! Mutation entry point for front ends.
//!
//! `CircuitSession` owns the circuit graph. Every operation that can change a
//! signal value re-runs propagation before returning, so callers only ever
//! observe settled circuits.

use lf_core::{CompId, ComponentKind, ConnId, Position};
use lf_graph::{CircuitGraph, Connection, Endpoint, GraphResult, RemovedComponent};
use lf_solver::{Propagation, PropagationConfig, propagate};
use tracing::debug;

use crate::error::AppResult;
use crate::snapshot::CircuitSnapshot;

/// What the session is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Inside `batch`; propagation is deferred to the end of the batch.
    Batching,
    Simulating,
}

/// Result of a mutation: the operation's own value plus the settled view.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub value: T,
    pub snapshot: CircuitSnapshot,
}

/// A circuit plus the propagation settings applied after each edit.
#[derive(Debug, Clone, Default)]
pub struct CircuitSession {
    graph: CircuitGraph,
    config: PropagationConfig,
    phase: Phase,
    /// A batch made a change that still needs propagating.
    pending: bool,
    last_run: Option<Propagation>,
}

impl CircuitSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PropagationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Replace the propagation settings. Takes effect on the next run.
    pub fn set_config(&mut self, config: PropagationConfig) {
        self.config = config;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read-only access to the underlying graph.
    pub fn graph(&self) -> &CircuitGraph {
        &self.graph
    }

    pub fn last_run(&self) -> Option<&Propagation> {
        self.last_run.as_ref()
    }

    pub fn snapshot(&self) -> CircuitSnapshot {
        CircuitSnapshot::capture(&self.graph, self.last_run.as_ref())
    }

    pub fn add_component(
        &mut self,
        kind: ComponentKind,
        position: impl Into<Position>,
    ) -> AppResult<Mutation<CompId>> {
        let position = position.into();
        let id = self.mutate("add_component", |g| Ok(g.add_component(kind, position)))?;
        Ok(self.settled(id))
    }

    /// Remove a component and every connection touching it.
    pub fn remove_component(&mut self, id: CompId) -> AppResult<Mutation<RemovedComponent>> {
        let removed = self.mutate("remove_component", |g| g.remove_component(id))?;
        Ok(self.settled(removed))
    }

    pub fn add_connection(
        &mut self,
        source: Endpoint,
        target: Endpoint,
    ) -> AppResult<Mutation<ConnId>> {
        let id = self.mutate("add_connection", |g| g.add_connection(source, target))?;
        Ok(self.settled(id))
    }

    pub fn remove_connection(&mut self, id: ConnId) -> AppResult<Mutation<Connection>> {
        let conn = self.mutate("remove_connection", |g| g.remove_connection(id))?;
        Ok(self.settled(conn))
    }

    /// Flip an INPUT component; the value is its new level.
    pub fn toggle_input(&mut self, id: CompId) -> AppResult<Mutation<bool>> {
        let level = self.mutate("toggle_input", |g| g.toggle_input(id))?;
        Ok(self.settled(level))
    }

    pub fn set_input(&mut self, id: CompId, value: bool) -> AppResult<Mutation<()>> {
        self.mutate("set_input", |g| g.set_input(id, value))?;
        Ok(self.settled(()))
    }

    /// Move a component. Layout only: no propagation runs.
    pub fn update_position(&mut self, id: CompId, position: impl Into<Position>) -> AppResult<()> {
        self.graph.update_position(id, position.into())?;
        Ok(())
    }

    /// Re-run propagation without changing the circuit.
    pub fn simulate(&mut self) -> AppResult<Propagation> {
        self.run()
    }

    /// Apply several edits with a single propagation at the end.
    ///
    /// If `edit` returns an error the graph is restored to its state before
    /// the batch and nothing is propagated.
    pub fn batch<R>(
        &mut self,
        edit: impl FnOnce(&mut BatchEdit<'_>) -> AppResult<R>,
    ) -> AppResult<Mutation<R>> {
        let saved = self.graph.clone();
        self.phase = Phase::Batching;
        self.pending = false;

        let result = edit(&mut BatchEdit { session: self });
        self.phase = Phase::Idle;

        let value = match result {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "batch rolled back");
                self.graph = saved;
                self.pending = false;
                return Err(err);
            }
        };
        if std::mem::take(&mut self.pending) {
            self.run()?;
        }
        Ok(self.settled(value))
    }

    /// Apply a structural edit, then propagate unless a batch is open.
    fn mutate<T>(
        &mut self,
        op: &'static str,
        apply: impl FnOnce(&mut CircuitGraph) -> GraphResult<T>,
    ) -> AppResult<T> {
        let value = apply(&mut self.graph)?;
        debug!(
            op,
            components = self.graph.component_count(),
            connections = self.graph.connection_count(),
            "circuit mutated"
        );
        if self.phase == Phase::Batching {
            self.pending = true;
        } else {
            self.run()?;
        }
        Ok(value)
    }

    fn run(&mut self) -> AppResult<Propagation> {
        self.phase = Phase::Simulating;
        let result = propagate(&mut self.graph, &self.config);
        self.phase = Phase::Idle;

        let report = result?;
        self.last_run = Some(report.clone());
        Ok(report)
    }

    fn settled<T>(&self, value: T) -> Mutation<T> {
        Mutation {
            value,
            snapshot: self.snapshot(),
        }
    }
}

/// Edit handle passed to `CircuitSession::batch`.
///
/// Offers the same structural operations as the session, without the
/// per-edit propagation and snapshot.
pub struct BatchEdit<'a> {
    session: &'a mut CircuitSession,
}

impl BatchEdit<'_> {
    pub fn add_component(
        &mut self,
        kind: ComponentKind,
        position: impl Into<Position>,
    ) -> AppResult<CompId> {
        let position = position.into();
        self.session
            .mutate("add_component", |g| Ok(g.add_component(kind, position)))
    }

    pub fn remove_component(&mut self, id: CompId) -> AppResult<RemovedComponent> {
        self.session
            .mutate("remove_component", |g| g.remove_component(id))
    }

    pub fn add_connection(&mut self, source: Endpoint, target: Endpoint) -> AppResult<ConnId> {
        self.session
            .mutate("add_connection", |g| g.add_connection(source, target))
    }

    /// Connect output 0 of `from` to input `slot` of `to`.
    pub fn wire(&mut self, from: CompId, to: CompId, slot: u8) -> AppResult<ConnId> {
        self.add_connection(Endpoint::output(from, 0), Endpoint::input(to, slot))
    }

    pub fn remove_connection(&mut self, id: ConnId) -> AppResult<Connection> {
        self.session
            .mutate("remove_connection", |g| g.remove_connection(id))
    }

    pub fn toggle_input(&mut self, id: CompId) -> AppResult<bool> {
        self.session.mutate("toggle_input", |g| g.toggle_input(id))
    }

    pub fn set_input(&mut self, id: CompId, value: bool) -> AppResult<()> {
        self.session.mutate("set_input", |g| g.set_input(id, value))
    }

    pub fn update_position(&mut self, id: CompId, position: impl Into<Position>) -> AppResult<()> {
        self.session.update_position(id, position)
    }

    /// The graph as edited so far (not yet propagated).
    pub fn graph(&self) -> &CircuitGraph {
        self.session.graph()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send<T: Send>() {}

    #[test]
    fn session_is_send() {
        assert_send::<CircuitSession>();
    }

    #[test]
    fn mutation_propagates() {
        let mut session = CircuitSession::new();
        let n = session
            .add_component(ComponentKind::Not, Position::default())
            .unwrap();
        // Floating input reads false, so NOT shows true
        assert_eq!(n.snapshot.value_of(n.value), Some(true));
        assert!(session.last_run().is_some_and(Propagation::converged));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn batch_defers_propagation() {
        let mut session = CircuitSession::new();
        let done = session
            .batch(|edit| {
                let n = edit.add_component(ComponentKind::Not, (0.0, 0.0))?;
                assert_eq!(edit.session.phase(), Phase::Batching);
                assert!(edit.session.last_run().is_none());
                Ok(n)
            })
            .unwrap();
        assert_eq!(done.snapshot.value_of(done.value), Some(true));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn empty_batch_does_not_run() {
        let mut session = CircuitSession::new();
        session.batch(|_| Ok(())).unwrap();
        assert!(session.last_run().is_none());
    }
}
