//! Role-specific payload encoders and shape validators.
//!
//! Each matrix role the solver accepts pairs a shape check with a byte
//! packer; both run before any frame is assembled, so an invalid matrix
//! never produces partial bytes on the wire.

use super::frame::{
    build_frame, op, CMD_BRANCH_ATTR, CMD_BRANCH_YC, CMD_BRANCH_YL, CMD_BRANCH_YR,
    CMD_CONDUCTANCE_INV, CMD_CONTROL, CMD_HISTORY_CURRENT, CMD_TOPOLOGY, CONTROL_MARKER,
};
use crate::error::{InloopError, Result};
use crate::matrix::Matrix;

/// Which per-branch admittance bank a vector addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchBank {
    /// Inductive admittances (YL)
    Inductive,
    /// Capacitive admittances (YC)
    Capacitive,
    /// Resistive admittances (YR)
    Resistive,
}

impl BranchBank {
    /// Wire command code for this bank.
    pub fn command(self) -> u16 {
        match self {
            BranchBank::Inductive => CMD_BRANCH_YL,
            BranchBank::Capacitive => CMD_BRANCH_YC,
            BranchBank::Resistive => CMD_BRANCH_YR,
        }
    }

    fn role(self) -> &'static str {
        match self {
            BranchBank::Inductive => "YL",
            BranchBank::Capacitive => "YC",
            BranchBank::Resistive => "YR",
        }
    }
}

/// Frame encoders for every command the solver understands.
///
/// Construction picks the matrix-set id scheme: [`MatrixPacker::new`]
/// leaves the extInfo high byte zero and expects the id to travel in a
/// separate set-matrix-id control frame, while
/// [`MatrixPacker::with_matrix_id`] embeds the id in the high byte of every
/// frame. A caller uses one scheme consistently, never both on the same
/// session.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixPacker {
    matrix_id: Option<u8>,
}

impl MatrixPacker {
    /// Packer for the separate set-matrix-id scheme.
    pub fn new() -> Self {
        Self { matrix_id: None }
    }

    /// Packer that embeds `id` in the extInfo high byte of every frame.
    pub fn with_matrix_id(id: u8) -> Self {
        Self { matrix_id: Some(id) }
    }

    /// Topology matrix A: 2-D signed-byte matrix, one byte per element,
    /// row-major; extInfo low byte carries the column count.
    pub fn pack_a(&self, matrix: &Matrix<i8>) -> Result<Vec<u8>> {
        let cols = dim8("A", matrix.cols())?;
        if matrix.rows() == 0 {
            return Err(InloopError::dimension_out_of_range("A", 0));
        }
        let payload: Vec<u8> = matrix.data().iter().map(|&v| v as u8).collect();
        Ok(build_frame(CMD_TOPOLOGY, self.ext_info(cols), &payload))
    }

    /// Inverse conductance G_inv: square f32 matrix with side in 1..=255,
    /// packed little-endian row-major; extInfo low byte carries the side.
    pub fn pack_g_inv(&self, matrix: &Matrix<f32>) -> Result<Vec<u8>> {
        if !matrix.is_square() {
            return Err(InloopError::invalid_shape(
                "G_inv",
                "square",
                matrix.rows(),
                matrix.cols(),
            ));
        }
        let side = dim8("G_inv", matrix.rows())?;
        Ok(build_frame(
            CMD_CONDUCTANCE_INV,
            self.ext_info(side),
            &pack_f32(matrix),
        ))
    }

    /// Historical current vector J (single column).
    pub fn pack_j(&self, matrix: &Matrix<f32>) -> Result<Vec<u8>> {
        self.column_frame(CMD_HISTORY_CURRENT, "J", matrix)
    }

    /// Branch attribute vector attr (single column).
    pub fn pack_attr(&self, matrix: &Matrix<f32>) -> Result<Vec<u8>> {
        self.column_frame(CMD_BRANCH_ATTR, "attr", matrix)
    }

    /// Branch admittance vector for one bank (single column).
    pub fn pack_branch(&self, bank: BranchBank, matrix: &Matrix<f32>) -> Result<Vec<u8>> {
        self.column_frame(bank.command(), bank.role(), matrix)
    }

    /// Clear the loaded matrix set on the device.
    pub fn pack_clear(&self) -> Vec<u8> {
        self.control(op::CLEAR)
    }

    /// Start the real-time solve.
    pub fn pack_start(&self) -> Vec<u8> {
        self.control(op::START)
    }

    /// Stop the real-time solve.
    pub fn pack_stop(&self) -> Vec<u8> {
        self.control(op::STOP)
    }

    /// Bind the active matrix-set id on the device (u32 BE payload).
    pub fn pack_set_matrix_id(&self, matrix_id: u32) -> Vec<u8> {
        build_frame(
            CMD_CONTROL,
            self.ext_info(op::SET_MATRIX_ID as u8),
            &matrix_id.to_be_bytes(),
        )
    }

    fn control(&self, operation: u16) -> Vec<u8> {
        build_frame(
            CMD_CONTROL,
            self.ext_info(operation as u8),
            &CONTROL_MARKER.to_be_bytes(),
        )
    }

    fn column_frame(
        &self,
        command: u16,
        role: &'static str,
        matrix: &Matrix<f32>,
    ) -> Result<Vec<u8>> {
        if !matrix.is_column() {
            return Err(InloopError::invalid_shape(
                role,
                "a single-column vector",
                matrix.rows(),
                matrix.cols(),
            ));
        }
        let rows = dim8(role, matrix.rows())?;
        Ok(build_frame(command, self.ext_info(rows), &pack_f32(matrix)))
    }

    fn ext_info(&self, low: u8) -> u16 {
        (u16::from(self.matrix_id.unwrap_or(0)) << 8) | u16::from(low)
    }
}

/// Validate an 8-bit wire dimension into 1..=255.
fn dim8(role: &'static str, dim: usize) -> Result<u8> {
    if (1..=255).contains(&dim) {
        Ok(dim as u8)
    } else {
        Err(InloopError::dimension_out_of_range(role, dim))
    }
}

/// Flatten a float matrix into its little-endian wire payload, row-major.
fn pack_f32(matrix: &Matrix<f32>) -> Vec<u8> {
    let mut payload = Vec::with_capacity(matrix.data().len() * 4);
    for &value in matrix.data() {
        payload.extend_from_slice(&value.to_le_bytes());
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::frame::Frame;

    #[test]
    fn test_a_matrix_round_trip() {
        let a = Matrix::from_rows(vec![vec![1i8, -1, 0], vec![0, 1, -1]]).unwrap();
        let bytes = MatrixPacker::new().pack_a(&a).unwrap();
        let frame = Frame::decode(&bytes).unwrap();
        assert_eq!(frame.command, CMD_TOPOLOGY);
        assert_eq!(frame.ext_low(), 3); // column count
        assert_eq!(frame.payload, vec![0x01, 0xFF, 0x00, 0x00, 0x01, 0xFF]);
    }

    #[test]
    fn test_a_matrix_rejects_empty() {
        let empty: Matrix<i8> = Matrix::zeros(0, 0);
        assert!(matches!(
            MatrixPacker::new().pack_a(&empty),
            Err(InloopError::DimensionOutOfRange { role: "A", dim: 0 })
        ));
    }

    #[test]
    fn test_g_inv_rejects_non_square() {
        let m: Matrix<f32> = Matrix::zeros(2, 3);
        let err = MatrixPacker::new().pack_g_inv(&m).unwrap_err();
        assert!(matches!(
            err,
            InloopError::InvalidShape {
                role: "G_inv",
                rows: 2,
                cols: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_g_inv_rejects_side_256() {
        let m: Matrix<f32> = Matrix::zeros(256, 256);
        assert!(matches!(
            MatrixPacker::new().pack_g_inv(&m),
            Err(InloopError::DimensionOutOfRange {
                role: "G_inv",
                dim: 256
            })
        ));
    }

    #[test]
    fn test_g_inv_payload_is_little_endian_f32() {
        let m = Matrix::from_rows(vec![vec![1.5f32, -2.0], vec![0.25, 4.0]]).unwrap();
        let bytes = MatrixPacker::new().pack_g_inv(&m).unwrap();
        let frame = Frame::decode(&bytes).unwrap();
        assert_eq!(frame.ext_low(), 2);
        let mut expected = Vec::new();
        for v in [1.5f32, -2.0, 0.25, 4.0] {
            expected.extend_from_slice(&v.to_le_bytes());
        }
        assert_eq!(frame.payload, expected);
    }

    #[test]
    fn test_j_requires_single_column() {
        let wide: Matrix<f32> = Matrix::zeros(3, 2);
        assert!(matches!(
            MatrixPacker::new().pack_j(&wide),
            Err(InloopError::InvalidShape { role: "J", .. })
        ));

        let j = Matrix::column(vec![10_000.0f32, 0.0, 0.0]);
        let frame = Frame::decode(&MatrixPacker::new().pack_j(&j).unwrap()).unwrap();
        assert_eq!(frame.command, CMD_HISTORY_CURRENT);
        assert_eq!(frame.ext_low(), 3); // row count
    }

    #[test]
    fn test_attr_is_column_oriented() {
        let row: Matrix<f32> = Matrix::zeros(1, 3);
        assert!(MatrixPacker::new().pack_attr(&row).is_err());
        let column = Matrix::column(vec![1.0f32, 2.0, 3.0]);
        assert!(MatrixPacker::new().pack_attr(&column).is_ok());
    }

    #[test]
    fn test_branch_bank_commands() {
        let v = Matrix::column(vec![0.0f32, 1e-5, 0.0]);
        let packer = MatrixPacker::new();
        for (bank, command) in [
            (BranchBank::Inductive, CMD_BRANCH_YL),
            (BranchBank::Capacitive, CMD_BRANCH_YC),
            (BranchBank::Resistive, CMD_BRANCH_YR),
        ] {
            let frame = Frame::decode(&packer.pack_branch(bank, &v).unwrap()).unwrap();
            assert_eq!(frame.command, command);
            assert_eq!(frame.ext_low(), 3);
        }
    }

    #[test]
    fn test_clear_golden_bytes() {
        // 00 00 | 00 01 | 00 04 | 55 55 | checksum 0x00AF
        assert_eq!(
            MatrixPacker::new().pack_clear(),
            vec![0x00, 0x00, 0x00, 0x01, 0x00, 0x04, 0x55, 0x55, 0x00, 0xAF]
        );
    }

    #[test]
    fn test_control_operations() {
        let packer = MatrixPacker::new();
        assert_eq!(Frame::decode(&packer.pack_start()).unwrap().ext_low(), 0x02);
        assert_eq!(Frame::decode(&packer.pack_stop()).unwrap().ext_low(), 0x03);
        for bytes in [packer.pack_start(), packer.pack_stop()] {
            let frame = Frame::decode(&bytes).unwrap();
            assert_eq!(frame.command, CMD_CONTROL);
            assert_eq!(frame.payload, CONTROL_MARKER.to_be_bytes());
        }
    }

    #[test]
    fn test_set_matrix_id_payload_big_endian() {
        let bytes = MatrixPacker::new().pack_set_matrix_id(0x0102_0304);
        let frame = Frame::decode(&bytes).unwrap();
        assert_eq!(frame.ext_low(), 0x10);
        assert_eq!(frame.payload, vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_embedded_id_fills_high_byte() {
        let packer = MatrixPacker::with_matrix_id(7);
        let j = Matrix::column(vec![1.0f32]);
        let frame = Frame::decode(&packer.pack_j(&j).unwrap()).unwrap();
        assert_eq!(frame.ext_high(), 7);
        assert_eq!(frame.ext_low(), 1);
        // Control frames carry the id too under this scheme.
        let clear = Frame::decode(&packer.pack_clear()).unwrap();
        assert_eq!(clear.ext_high(), 7);
        assert_eq!(clear.ext_low(), 0x01);
    }
}
