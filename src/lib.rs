//! # Inloop Core
//!
//! Matrix streaming front end for a hardware-in-the-loop circuit solver.
//!
//! This library provides:
//! - MNA (Modified Nodal Analysis) stamping of circuit element lists into
//!   a conductance matrix and right-hand-side vector
//! - A binary frame protocol for shipping matrix sets (A, G_inv, J, attr,
//!   YL/YC/YR) and control commands to the real-time solving device
//! - Built-in topology presets mirroring the device's demo circuits
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Circuit element model and MNA stamping
//! - [`matrix`] - Dense row-major matrix storage
//! - [`protocol`] - Checksum, frame layout, packers, and the send session
//! - [`topology`] - Preset matrix sets and the ordered frame sequence
//!
//! ## Pipeline
//!
//! ```text
//! element list ──> CircuitSystem ──> {matrix, rhs} ─┐
//!                                                   ├─> MatrixSender ──> frames ──> transport
//! topology presets ─────────────────────────────────┘
//! ```
//!
//! Sequencing on the wire is: clear, matrix-id bind, data matrices, start.
//! The transport itself (serial port, socket) is outside this crate; the
//! library only produces the bytes to write. Likewise the crate never
//! solves the assembled system - factorization and time stepping happen on
//! the device.

pub mod circuit;
pub mod error;
pub mod matrix;
pub mod protocol;
pub mod topology;

// Re-export main types for convenience
pub use circuit::CircuitSystem;
pub use error::{InloopError, Result};
pub use matrix::Matrix;
pub use protocol::MatrixSender;

/// Default serial line rate of the solver link, in baud.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default integration step handed to the solver, in seconds.
pub const DEFAULT_TIME_STEP: f64 = 1e-6;
