//! Stable indexing for solver integration.
//!
//! Provides a mapping between component IDs / port endpoints and contiguous
//! indices (0..N), so a solver can keep every port value in one flat buffer.

use core::ops::Range;

use lf_core::CompId;

use crate::error::{GraphError, GraphResult};
use crate::graph::{CircuitGraph, Endpoint, PortDirection};

/// Index map providing contiguous indices for components and port slots.
///
/// Components are numbered in ascending id order. Each component owns a
/// contiguous run of slots: its inputs in port order, then its outputs.
#[derive(Debug, Clone)]
pub struct IndexMap {
    /// Contiguous list of component IDs (index -> CompId).
    comp_ids: Vec<CompId>,

    /// Reverse lookup: CompId -> index.
    /// Sized to max(CompId.index) + 1; None if that ID doesn't exist.
    comp_to_idx: Vec<Option<usize>>,

    /// Component i's slots are `slot_offsets[i]..slot_offsets[i + 1]`.
    slot_offsets: Vec<usize>,

    /// Number of input slots at the front of each component's run.
    input_counts: Vec<usize>,
}

impl IndexMap {
    /// Build an index map from a graph.
    pub fn from_graph(graph: &CircuitGraph) -> Self {
        let comp_ids: Vec<CompId> = graph.components().map(|c| c.id).collect();

        let max_comp_idx = comp_ids
            .iter()
            .map(|id| id.index() as usize)
            .max()
            .unwrap_or(0);
        let mut comp_to_idx = vec![None; max_comp_idx + 1];
        for (i, &id) in comp_ids.iter().enumerate() {
            comp_to_idx[id.index() as usize] = Some(i);
        }

        let mut slot_offsets = Vec::with_capacity(comp_ids.len() + 1);
        let mut input_counts = Vec::with_capacity(comp_ids.len());
        let mut total = 0;
        slot_offsets.push(total);
        for comp in graph.components() {
            input_counts.push(comp.inputs().len());
            total += comp.inputs().len() + comp.outputs().len();
            slot_offsets.push(total);
        }

        Self {
            comp_ids,
            comp_to_idx,
            slot_offsets,
            input_counts,
        }
    }

    /// Number of components in the index.
    pub fn comp_count(&self) -> usize {
        self.comp_ids.len()
    }

    /// Total number of port slots.
    pub fn slot_count(&self) -> usize {
        self.slot_offsets.last().copied().unwrap_or(0)
    }

    /// Get the contiguous index for a component ID.
    pub fn comp_idx(&self, id: CompId) -> GraphResult<usize> {
        self.comp_to_idx
            .get(id.index() as usize)
            .and_then(|&opt| opt)
            .ok_or(GraphError::UnknownComponent { comp: id })
    }

    /// Get the component ID for a contiguous index (panics if out of bounds).
    pub fn comp_id(&self, i: usize) -> CompId {
        self.comp_ids[i]
    }

    /// All component IDs in index order.
    pub fn comp_ids(&self) -> &[CompId] {
        &self.comp_ids
    }

    /// Input slots of component `i`.
    pub fn input_slots(&self, i: usize) -> Range<usize> {
        let start = self.slot_offsets[i];
        start..start + self.input_counts[i]
    }

    /// Output slots of component `i`.
    pub fn output_slots(&self, i: usize) -> Range<usize> {
        self.slot_offsets[i] + self.input_counts[i]..self.slot_offsets[i + 1]
    }

    /// Flat slot of a port endpoint.
    pub fn slot(&self, endpoint: Endpoint) -> GraphResult<usize> {
        let i = self.comp_idx(endpoint.comp)?;
        let range = match endpoint.port.direction {
            PortDirection::Input => self.input_slots(i),
            PortDirection::Output => self.output_slots(i),
        };
        let slot = range.start + endpoint.port.slot as usize;
        if range.contains(&slot) {
            Ok(slot)
        } else {
            Err(GraphError::InvalidEndpoint {
                endpoint,
                expected: endpoint.port.direction,
            })
        }
    }

    /// Index of the component owning `slot`.
    pub fn slot_owner(&self, slot: usize) -> usize {
        self.slot_offsets.partition_point(|&offset| offset <= slot) - 1
    }
}
