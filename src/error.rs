//! Error types for the Inloop matrix streaming front end.
//!
//! This module provides a unified error type [`InloopError`] that covers
//! all error conditions that can occur during netlist parsing, MNA stamping,
//! and protocol frame encoding/decoding.

use thiserror::Error;

/// Result type alias using [`InloopError`].
pub type Result<T> = std::result::Result<T, InloopError>;

/// Unified error type for all Inloop operations.
#[derive(Error, Debug)]
pub enum InloopError {
    // ============ Protocol Encoding Errors ============
    /// Matrix has the wrong dimensionality or orientation for a wire role
    #[error("{role} must be {expected}, got {rows}x{cols}")]
    InvalidShape {
        role: &'static str,
        expected: &'static str,
        rows: usize,
        cols: usize,
    },

    /// 8-bit-encoded dimension outside the range the link can carry
    #[error("{role} dimension {dim} outside supported range 1-255")]
    DimensionOutOfRange { role: &'static str, dim: usize },

    // ============ Protocol Decoding Errors ============
    /// Frame shorter than its fixed overhead or declared length
    #[error("frame truncated: need {required} bytes, got {actual}")]
    TruncatedFrame { required: usize, actual: usize },

    /// Length field disagrees with the bytes actually present
    #[error("frame length field declares {declared} bytes, frame carries {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// Trailing checksum does not match the recomputed value
    #[error("checksum mismatch: frame carries 0x{carried:04X}, computed 0x{computed:04X}")]
    ChecksumMismatch { carried: u16, computed: u16 },

    // ============ Stamping Errors ============
    /// Element kind string with no registered stamp handler
    #[error("unsupported element kind '{kind}'")]
    UnsupportedElementKind { kind: String },

    /// Node index beyond the sized system
    #[error("node {node} outside system of size {size}")]
    NodeOutOfRange { node: i32, size: usize },

    /// Matrix literal with rows of differing lengths
    #[error("ragged matrix literal: row {row} has {len} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    // ============ Topology Lookup Errors ============
    /// Preset id with no entry in the topology table
    #[error("unknown topology preset {id}")]
    UnknownTopology { id: u32 },

    // ============ I/O Errors ============
    /// Error reading a netlist file
    #[error("failed to read netlist '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the frame stream to its sink
    #[error("failed to write frame stream to '{target}': {source}")]
    StreamWriteError {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a JSON netlist
    #[error("netlist parse error: {0}")]
    NetlistParseError(#[from] serde_json::Error),
}

impl InloopError {
    /// Create a shape error for a matrix role.
    pub fn invalid_shape(
        role: &'static str,
        expected: &'static str,
        rows: usize,
        cols: usize,
    ) -> Self {
        Self::InvalidShape {
            role,
            expected,
            rows,
            cols,
        }
    }

    /// Create a dimension range error for a matrix role.
    pub fn dimension_out_of_range(role: &'static str, dim: usize) -> Self {
        Self::DimensionOutOfRange { role, dim }
    }

    /// Create an unsupported element kind error.
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedElementKind { kind: kind.into() }
    }
}
