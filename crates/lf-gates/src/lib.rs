//! lf-gates: gate evaluation for logicflow.
//!
//! Provides:
//! - `evaluate`: the stateless truth function for every gate kind
//! - `combinations`: enumeration of input vectors in counting order
//!
//! Gates are deterministic functions of their ordered inputs and carry no
//! state, so the propagation engine can evaluate them in any order.
//!
//! # Example
//!
//! ```
//! use lf_core::ComponentKind;
//! use lf_gates::evaluate;
//!
//! assert_eq!(evaluate(ComponentKind::Nand, &[true, true]), Some(false));
//! assert_eq!(evaluate(ComponentKind::Xor, &[true, false]), Some(true));
//! assert_eq!(evaluate(ComponentKind::Input, &[]), None);
//! ```

pub mod eval;
pub mod truth;

pub use eval::{evaluate, parity};
pub use truth::{combinations, gate_truth_table};
