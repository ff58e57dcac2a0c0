//! Circuit element model and MNA stamping.
//!
//! This module turns an ordered element list into the conductance matrix
//! and right-hand-side vector of the circuit's linear system. The matrices
//! it produces are what the protocol layer ships to the hardware solver.

mod element;
mod stamp;
mod types;

pub use element::{CircuitElement, ElementDef, NodePair};
pub use stamp::CircuitSystem;
pub use types::{BranchId, ElementKind, NodeId};
