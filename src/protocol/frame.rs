//! Frame assembly and decoding.
//!
//! Every message on the solver link uses the same layout:
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬─────────────┬──────────┐
//! │ Command  │ ExtInfo  │ Length   │ Payload     │ Checksum │
//! │ 2 bytes  │ 2 bytes  │ 2 bytes  │ len-2 bytes │ 2 bytes  │
//! │ u16 BE   │ u16 BE   │ u16 BE   │             │ u16 BE   │
//! └──────────┴──────────┴──────────┴─────────────┴──────────┘
//! ```
//!
//! `Length` counts the payload plus the trailing 2-byte checksum. The
//! checksum covers the header and payload. Payload element encoding is
//! role-specific and owned by the packer, not this module.

use super::checksum::checksum;
use crate::error::{InloopError, Result};

/// Header size in bytes (three big-endian u16 fields).
pub const HEADER_SIZE: usize = 6;

/// Trailing checksum size in bytes.
pub const CHECKSUM_SIZE: usize = 2;

/// Fixed per-frame overhead: header plus checksum.
pub const FRAME_OVERHEAD: usize = HEADER_SIZE + CHECKSUM_SIZE;

/// Control command (sub-operation in the extInfo low byte).
pub const CMD_CONTROL: u16 = 0x0000;
/// Topology matrix A (signed bytes, extInfo low byte = column count).
pub const CMD_TOPOLOGY: u16 = 0x0001;
/// Inverse conductance matrix G_inv (f32, extInfo low byte = side).
pub const CMD_CONDUCTANCE_INV: u16 = 0x0002;
/// Historical current vector J (f32, extInfo low byte = row count).
pub const CMD_HISTORY_CURRENT: u16 = 0x0003;
/// Branch attribute vector attr (f32, extInfo low byte = row count).
pub const CMD_BRANCH_ATTR: u16 = 0x0004;
/// Branch inductive admittance vector YL.
pub const CMD_BRANCH_YL: u16 = 0x0005;
/// Branch capacitive admittance vector YC.
pub const CMD_BRANCH_YC: u16 = 0x0006;
/// Branch resistive admittance vector YR.
pub const CMD_BRANCH_YR: u16 = 0x0007;

/// Fixed payload word carried by clear/start/stop control frames.
pub const CONTROL_MARKER: u16 = 0x5555;

/// Sub-operation codes for [`CMD_CONTROL`] frames.
pub mod op {
    /// Clear the loaded matrix set.
    pub const CLEAR: u16 = 0x01;
    /// Start the real-time solve.
    pub const START: u16 = 0x02;
    /// Stop the real-time solve.
    pub const STOP: u16 = 0x03;
    /// Bind the active matrix-set id (u32 BE payload).
    pub const SET_MATRIX_ID: u16 = 0x10;
}

/// Assemble one complete frame.
///
/// Never fails and performs no range validation; domain checks on
/// `command`/`ext_info`/payload shape belong to the packer. The output is
/// always `payload.len() + 8` bytes.
pub fn build_frame(command: u16, ext_info: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(FRAME_OVERHEAD + payload.len());
    frame.extend_from_slice(&command.to_be_bytes());
    frame.extend_from_slice(&ext_info.to_be_bytes());
    frame.extend_from_slice(&((payload.len() + CHECKSUM_SIZE) as u16).to_be_bytes());
    frame.extend_from_slice(payload);
    let sum = checksum(&frame);
    frame.extend_from_slice(&sum.to_be_bytes());
    frame
}

/// A decoded frame.
///
/// Frames are immutable once built; this struct exists for diagnostics and
/// tests, the transmit path works on raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: u16,
    pub ext_info: u16,
    pub payload: Vec<u8>,
    pub checksum: u16,
}

impl Frame {
    /// Decode one frame, verifying the length field and checksum.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < FRAME_OVERHEAD {
            return Err(InloopError::TruncatedFrame {
                required: FRAME_OVERHEAD,
                actual: buf.len(),
            });
        }
        let command = u16::from_be_bytes([buf[0], buf[1]]);
        let ext_info = u16::from_be_bytes([buf[2], buf[3]]);
        let length = usize::from(u16::from_be_bytes([buf[4], buf[5]]));
        if length < CHECKSUM_SIZE {
            return Err(InloopError::TruncatedFrame {
                required: FRAME_OVERHEAD,
                actual: HEADER_SIZE + length,
            });
        }
        let declared = HEADER_SIZE + length;
        if declared != buf.len() {
            return Err(InloopError::LengthMismatch {
                declared,
                actual: buf.len(),
            });
        }
        let payload_end = buf.len() - CHECKSUM_SIZE;
        let carried = u16::from_be_bytes([buf[payload_end], buf[payload_end + 1]]);
        let computed = checksum(&buf[..payload_end]);
        if carried != computed {
            return Err(InloopError::ChecksumMismatch { carried, computed });
        }
        Ok(Self {
            command,
            ext_info,
            payload: buf[HEADER_SIZE..payload_end].to_vec(),
            checksum: carried,
        })
    }

    /// Low byte of extInfo (sub-operation or 8-bit dimension).
    pub fn ext_low(&self) -> u8 {
        (self.ext_info & 0x00FF) as u8
    }

    /// High byte of extInfo (embedded matrix-set id, zero when unused).
    pub fn ext_high(&self) -> u8 {
        (self.ext_info >> 8) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_length_invariant() {
        for payload_len in [0usize, 1, 2, 13, 255] {
            let payload = vec![0xABu8; payload_len];
            let frame = build_frame(0x0001, 0x0203, &payload);
            assert_eq!(frame.len(), payload.len() + 8);
        }
    }

    #[test]
    fn test_header_big_endian_byte_order() {
        let frame = build_frame(0x0102, 0x0304, &[0xAA]);
        assert_eq!(&frame[..6], &[0x01, 0x02, 0x03, 0x04, 0x00, 0x03]);
        assert_eq!(frame[6], 0xAA);
    }

    #[test]
    fn test_length_field_counts_checksum() {
        let frame = build_frame(0x0000, 0x0001, &[0x55, 0x55]);
        // 2 payload bytes + 2 checksum bytes
        assert_eq!(u16::from_be_bytes([frame[4], frame[5]]), 4);
    }

    #[test]
    fn test_checksum_covers_header_and_payload() {
        let frame = build_frame(0x0000, 0x0001, &[0x55, 0x55]);
        let body_sum: u16 = frame[..frame.len() - 2]
            .iter()
            .map(|&b| u16::from(b))
            .sum();
        let carried = u16::from_be_bytes([frame[8], frame[9]]);
        assert_eq!(carried, body_sum);
    }

    #[test]
    fn test_decode_round_trip() {
        let payload = vec![0x01, 0xFF, 0x00, 0x7F];
        let bytes = build_frame(0x0001, 0x0004, &payload);
        let frame = Frame::decode(&bytes).unwrap();
        assert_eq!(frame.command, 0x0001);
        assert_eq!(frame.ext_info, 0x0004);
        assert_eq!(frame.ext_low(), 0x04);
        assert_eq!(frame.ext_high(), 0x00);
        assert_eq!(frame.payload, payload);
    }

    #[test]
    fn test_decode_rejects_truncated() {
        let err = Frame::decode(&[0x00; 5]).unwrap_err();
        assert!(matches!(
            err,
            InloopError::TruncatedFrame {
                required: 8,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_decode_rejects_length_mismatch() {
        let mut bytes = build_frame(0x0001, 0x0001, &[0x01]);
        bytes.push(0x00); // trailing garbage
        assert!(matches!(
            Frame::decode(&bytes),
            Err(InloopError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_corrupted_checksum() {
        let mut bytes = build_frame(0x0001, 0x0001, &[0x01, 0x02]);
        bytes[6] ^= 0xFF; // corrupt the payload
        assert!(matches!(
            Frame::decode(&bytes),
            Err(InloopError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_payload_frame() {
        let bytes = build_frame(0x0000, 0x0000, &[]);
        assert_eq!(bytes.len(), FRAME_OVERHEAD);
        let frame = Frame::decode(&bytes).unwrap();
        assert!(frame.payload.is_empty());
    }
}
