//! Propagation configuration.

/// Where the first pass starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StartState {
    /// Reset every derived port to `false` first. Results depend only on
    /// topology, INPUT values and the cap, so repeated runs are identical
    /// even for circuits that never settle.
    #[default]
    Cold,
    /// Continue from the port values left by the previous run.
    Warm,
}

/// Propagation engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropagationConfig {
    /// Fixed pass cap; `None` selects the adaptive cap.
    pub max_passes: Option<usize>,
    /// Floor for the adaptive cap
    pub min_passes: usize,
    /// Initial port state for each run
    pub start: StartState,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            max_passes: None,
            min_passes: 16,
            start: StartState::Cold,
        }
    }
}

impl PropagationConfig {
    /// Configuration with a fixed pass cap.
    pub fn fixed(max_passes: usize) -> Self {
        Self {
            max_passes: Some(max_passes),
            ..Self::default()
        }
    }

    /// Number of passes allowed for a graph with `component_count`
    /// components.
    ///
    /// The adaptive cap is `component_count + 1`: the longest dependency
    /// chain of an acyclic graph never exceeds the component count, and one
    /// further pass confirms the fixpoint. At least one pass always runs.
    pub fn pass_cap(&self, component_count: usize) -> usize {
        self.max_passes
            .unwrap_or_else(|| self.min_passes.max(component_count + 1))
            .max(1)
    }
}
