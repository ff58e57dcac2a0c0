//! Wire protocol for the real-time solver link.
//!
//! The device consumes fixed-format binary frames over a raw byte stream.
//! This module owns everything between a validated matrix and the bytes on
//! that stream:
//!
//! - [`checksum`] - end-around-carry additive checksum
//! - [`frame`] - frame layout, command codes, assembly and decoding
//! - [`packer`] - per-role shape validation and payload encoding
//! - [`session`] - stateful sender bound to a matrix-set id
//!
//! The transport itself (serial port, socket) is external; everything here
//! is a pure bytes-in/bytes-out transformation.

pub mod checksum;
pub mod frame;
pub mod packer;
pub mod session;

pub use checksum::checksum;
pub use frame::{build_frame, Frame};
pub use packer::{BranchBank, MatrixPacker};
pub use session::MatrixSender;
