//! Truth functions for each component kind.

use lf_core::ComponentKind;

/// Evaluate a component kind over its ordered input values.
///
/// Returns `None` for INPUT (driven externally) and OUTPUT (a display sink
/// that mirrors its input). Gates accept any number of inputs: AND/OR fold
/// over all of them, XOR is odd parity, NOT negates the first input.
pub fn evaluate(kind: ComponentKind, inputs: &[bool]) -> Option<bool> {
    let out = match kind {
        ComponentKind::Input | ComponentKind::Output => return None,
        ComponentKind::And => all_true(inputs),
        ComponentKind::Or => any_true(inputs),
        ComponentKind::Not => !inputs.first().copied().unwrap_or(false),
        ComponentKind::Nand => !all_true(inputs),
        ComponentKind::Nor => !any_true(inputs),
        ComponentKind::Xor => parity(inputs),
        ComponentKind::Xnor => !parity(inputs),
    };
    Some(out)
}

/// True iff an odd number of inputs are true.
pub fn parity(inputs: &[bool]) -> bool {
    inputs.iter().fold(false, |acc, &v| acc ^ v)
}

fn all_true(inputs: &[bool]) -> bool {
    inputs.iter().all(|&v| v)
}

fn any_true(inputs: &[bool]) -> bool {
    inputs.iter().any(|&v| v)
}
