//! Built-in topology presets and the ordered frame sequence.
//!
//! The solver firmware ships with a small set of demo circuits addressed
//! by numeric id; each entry carries the full matrix set the device needs
//! (topology matrix A, inverse conductance G_inv, branch admittance banks
//! YL/YC/YR, initial history currents J, and the per-branch attribute
//! codes). Matrices for other circuits come from the stamper instead.

use crate::error::{InloopError, Result};
use crate::matrix::Matrix;
use crate::protocol::MatrixSender;

/// Branch attribute code: independent source.
pub const ATTR_SOURCE: f32 = 1.0;
/// Branch attribute code: inductor.
pub const ATTR_INDUCTOR: f32 = 2.0;
/// Branch attribute code: capacitor.
pub const ATTR_CAPACITOR: f32 = 3.0;
/// Branch attribute code: resistor.
pub const ATTR_RESISTOR: f32 = 4.0;

/// One complete matrix set for the solver.
#[derive(Debug, Clone)]
pub struct TopologyPreset {
    pub a: Matrix<i8>,
    pub g_inv: Matrix<f32>,
    pub yl: Matrix<f32>,
    pub yc: Matrix<f32>,
    pub yr: Matrix<f32>,
    pub j: Matrix<f32>,
    pub attr: Matrix<f32>,
    /// Integration step the matrices were discretized with, in seconds.
    pub dt: f64,
}

/// Look up a built-in preset by numeric id.
pub fn preset(id: u32) -> Result<TopologyPreset> {
    match id {
        1 => source_lc_loop(),
        2 => source_lc_loaded(),
        _ => Err(InloopError::UnknownTopology { id }),
    }
}

/// Preset 1: 0-10V-100mH-10uF-0, a source/inductor/capacitor loop.
fn source_lc_loop() -> Result<TopologyPreset> {
    Ok(TopologyPreset {
        a: Matrix::from_rows(vec![vec![1, -1, 0], vec![0, 1, -1]])?,
        g_inv: Matrix::from_rows(vec![
            vec![9.999_999_9e-4, 9.999_989_9e-10],
            vec![9.999_989_9e-10, 9.999_990_0e-2],
        ])?,
        yl: Matrix::column(vec![0.0, 1e-5, 0.0]),
        yc: Matrix::column(vec![0.0, 0.0, 10.0]),
        yr: Matrix::column(vec![1000.0, 0.0, 0.0]),
        j: Matrix::column(vec![10_000.0, 0.0, 0.0]),
        attr: Matrix::column(vec![ATTR_SOURCE, ATTR_INDUCTOR, ATTR_CAPACITOR]),
        dt: 1e-6,
    })
}

/// Preset 2: 0-10V-100mH-10uF=100R-0, the same loop with a resistive load
/// across the capacitor.
fn source_lc_loaded() -> Result<TopologyPreset> {
    Ok(TopologyPreset {
        a: Matrix::from_rows(vec![vec![1, -1, 0, 0], vec![0, 1, -1, -1]])?,
        g_inv: Matrix::from_rows(vec![
            vec![9.999_999_90e-4, 9.989_999_91e-10],
            vec![9.989_999_91e-10, 9.990_000_01e-2],
        ])?,
        yl: Matrix::column(vec![0.0, 1e-5, 0.0, 0.0]),
        yc: Matrix::column(vec![0.0, 0.0, 0.0, 10.0]),
        yr: Matrix::column(vec![1000.0, 0.0, 1e-2, 0.0]),
        j: Matrix::column(vec![10_000.0, 0.0, 0.0, 0.0]),
        attr: Matrix::column(vec![
            ATTR_SOURCE,
            ATTR_INDUCTOR,
            ATTR_RESISTOR,
            ATTR_CAPACITOR,
        ]),
        dt: 1e-6,
    })
}

/// Encode the complete ordered transmission for one preset.
///
/// The transport contract is: clear, then the matrix-set id bind, then the
/// data matrices, then start. Start is only meaningful to the device once
/// a topology is loaded, so the order is not negotiable.
pub fn frame_sequence(sender: &MatrixSender, preset: &TopologyPreset) -> Result<Vec<Vec<u8>>> {
    let mut frames = vec![sender.send_clear(), sender.send_matrix_id()];
    frames.push(sender.send_a(&preset.a)?);
    frames.push(sender.send_g_inv(&preset.g_inv)?);
    frames.push(sender.send_yl(&preset.yl)?);
    frames.push(sender.send_yc(&preset.yc)?);
    frames.push(sender.send_yr(&preset.yr)?);
    frames.push(sender.send_j(&preset.j)?);
    frames.push(sender.send_attr(&preset.attr)?);
    frames.push(sender.send_start());
    Ok(frames)
}
