//! Stateful frame sender bound to one matrix-set id.

use super::packer::{BranchBank, MatrixPacker};
use crate::error::Result;
use crate::matrix::Matrix;

/// A protocol session for one matrix set.
///
/// Holds the numeric matrix-set id and exposes one method per command,
/// each returning a complete, ready-to-transmit frame. The sender keeps no
/// other state: methods may be called in any order, and sequencing
/// (clear, then matrix data, then start) is the orchestrator's contract
/// with the transport, not this type's.
///
/// The id travels in the dedicated set-matrix-id control frame; the
/// per-frame embedded-id scheme is available on [`MatrixPacker`] directly
/// and is never mixed with a `MatrixSender`.
#[derive(Debug, Clone)]
pub struct MatrixSender {
    matrix_id: u32,
    packer: MatrixPacker,
}

impl MatrixSender {
    /// Create a sender bound to `matrix_id`.
    pub fn new(matrix_id: u32) -> Self {
        Self {
            matrix_id,
            packer: MatrixPacker::new(),
        }
    }

    /// The bound matrix-set id.
    pub fn matrix_id(&self) -> u32 {
        self.matrix_id
    }

    /// Clear the loaded matrix set.
    pub fn send_clear(&self) -> Vec<u8> {
        self.packer.pack_clear()
    }

    /// Start the real-time solve.
    pub fn send_start(&self) -> Vec<u8> {
        self.packer.pack_start()
    }

    /// Stop the real-time solve.
    pub fn send_stop(&self) -> Vec<u8> {
        self.packer.pack_stop()
    }

    /// Bind this session's matrix-set id on the device.
    pub fn send_matrix_id(&self) -> Vec<u8> {
        self.packer.pack_set_matrix_id(self.matrix_id)
    }

    /// Send the topology matrix A.
    pub fn send_a(&self, matrix: &Matrix<i8>) -> Result<Vec<u8>> {
        self.packer.pack_a(matrix)
    }

    /// Send the inverse conductance matrix G_inv.
    pub fn send_g_inv(&self, matrix: &Matrix<f32>) -> Result<Vec<u8>> {
        self.packer.pack_g_inv(matrix)
    }

    /// Send the historical current vector J.
    pub fn send_j(&self, matrix: &Matrix<f32>) -> Result<Vec<u8>> {
        self.packer.pack_j(matrix)
    }

    /// Send the branch attribute vector attr.
    pub fn send_attr(&self, matrix: &Matrix<f32>) -> Result<Vec<u8>> {
        self.packer.pack_attr(matrix)
    }

    /// Send the branch inductive admittance vector YL.
    pub fn send_yl(&self, matrix: &Matrix<f32>) -> Result<Vec<u8>> {
        self.packer.pack_branch(BranchBank::Inductive, matrix)
    }

    /// Send the branch capacitive admittance vector YC.
    pub fn send_yc(&self, matrix: &Matrix<f32>) -> Result<Vec<u8>> {
        self.packer.pack_branch(BranchBank::Capacitive, matrix)
    }

    /// Send the branch resistive admittance vector YR.
    pub fn send_yr(&self, matrix: &Matrix<f32>) -> Result<Vec<u8>> {
        self.packer.pack_branch(BranchBank::Resistive, matrix)
    }
}
