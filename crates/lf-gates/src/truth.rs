//! Input enumeration for truth tables.

use lf_core::ComponentKind;

use crate::eval::evaluate;

/// Every assignment of `bits` boolean inputs, in binary counting order.
///
/// The first element of each vector is the most significant bit, so row `n`
/// spells `n` in binary. `bits` must be below `usize::BITS`.
pub fn combinations(bits: usize) -> impl Iterator<Item = Vec<bool>> {
    let total: usize = 1 << bits;
    (0..total).map(move |n| (0..bits).rev().map(|i| (n >> i) & 1 == 1).collect())
}

/// Full truth table of a gate kind over its standard input count.
///
/// Empty for INPUT and OUTPUT.
pub fn gate_truth_table(kind: ComponentKind) -> Vec<(Vec<bool>, bool)> {
    if !kind.is_gate() {
        return Vec::new();
    }
    combinations(kind.input_count())
        .filter_map(|row| evaluate(kind, &row).map(|out| (row, out)))
        .collect()
}
