//! lf-core: stable foundation for logicflow.
//!
//! Contains:
//! - ids (stable compact IDs for components and connections)
//! - kind (the fixed set of component kinds and their port cardinality)
//! - position (opaque layout metadata owned by the front end)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod kind;
pub mod position;

// Re-exports: nice ergonomics for downstream crates
pub use error::{LfError, LfResult};
pub use ids::*;
pub use kind::ComponentKind;
pub use position::Position;
