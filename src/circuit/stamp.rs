//! MNA system assembly (stamping).
//!
//! [`CircuitSystem`] consumes an ordered element list and accumulates each
//! element's contribution into the conductance matrix and right-hand-side
//! vector per Modified Nodal Analysis. It assembles only; solving the
//! system is the job of the downstream hardware.

use log::debug;

use super::element::CircuitElement;
use super::types::{BranchId, ElementKind};
use crate::error::{InloopError, Result};
use crate::matrix::Matrix;

/// The stamped linear system of one circuit: elements, conductance matrix,
/// and right-hand side.
///
/// The system is rebuilt from scratch on every [`set`](CircuitSystem::set);
/// there is no incremental update. Row/column `i` (0-based) holds the
/// unknown for 1-based node or branch row `i + 1`.
#[derive(Debug, Clone)]
pub struct CircuitSystem {
    elements: Vec<CircuitElement>,
    matrix: Matrix<f64>,
    rhs: Vec<f64>,
}

impl CircuitSystem {
    /// Create an empty system.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            matrix: Matrix::zeros(0, 0),
            rhs: Vec::new(),
        }
    }

    /// Assemble a system from an element list.
    ///
    /// Voltage-type elements receive their branch index in encounter order,
    /// the matrix and rhs are sized to
    /// `element count - 1 + voltage-type count`, and every element is
    /// stamped in list order.
    pub fn build(elements: Vec<CircuitElement>) -> Result<Self> {
        let mut elements = elements;
        let mut n_branches = 0usize;
        for element in &mut elements {
            element.branch = if element.kind.is_voltage_type() {
                let branch = BranchId(n_branches);
                n_branches += 1;
                Some(branch)
            } else {
                None
            };
        }

        // One row per element beyond the ground reference, plus one
        // auxiliary current unknown per voltage-type element.
        let size = (elements.len() + n_branches).saturating_sub(1);
        let mut system = Self {
            elements,
            matrix: Matrix::zeros(size, size),
            rhs: vec![0.0; size],
        };

        let mut next_branch = 0usize;
        for idx in 0..system.elements.len() {
            let element = system.elements[idx];
            debug!(
                "stamping {} between {} and {}",
                element.kind, element.nodes[0], element.nodes[1]
            );
            match element.kind {
                ElementKind::Resistor => system.stamp_resistor(&element)?,
                ElementKind::Voltage | ElementKind::Wire => {
                    let branch = BranchId(next_branch);
                    next_branch += 1;
                    system.stamp_voltage_type(&element, branch)?;
                }
            }
        }

        Ok(system)
    }

    /// Replace the element list and restamp the whole system.
    ///
    /// On failure the previous system is left untouched; a partially
    /// stamped matrix is never observable.
    pub fn set(&mut self, elements: Vec<CircuitElement>) -> Result<()> {
        *self = Self::build(elements)?;
        Ok(())
    }

    /// The registered elements, with branch indices assigned.
    pub fn elements(&self) -> &[CircuitElement] {
        &self.elements
    }

    /// The stamped conductance matrix.
    pub fn matrix(&self) -> &Matrix<f64> {
        &self.matrix
    }

    /// The stamped right-hand-side vector.
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Side length of the square system.
    pub fn size(&self) -> usize {
        self.rhs.len()
    }

    fn stamp_resistor(&mut self, element: &CircuitElement) -> Result<()> {
        let [n1, n2] = element.nodes;
        // The solver firmware takes the raw element value as the
        // conductance contribution here, not 1/R.
        let g = element.value;
        self.stamp_matrix(n1.0, n1.0, g)?;
        self.stamp_matrix(n2.0, n2.0, g)?;
        self.stamp_matrix(n1.0, n2.0, -g)?;
        self.stamp_matrix(n2.0, n1.0, -g)?;
        Ok(())
    }

    /// Standard MNA extra-unknown stamp for the constraint
    /// `V(n1) - V(n2) = value`; a wire drives the constraint to zero volts.
    fn stamp_voltage_type(&mut self, element: &CircuitElement, branch: BranchId) -> Result<()> {
        let [n1, n2] = element.nodes;
        let row = self.branch_row(branch);
        self.stamp_matrix(row, n1.0, -1.0)?;
        self.stamp_matrix(row, n2.0, 1.0)?;
        self.stamp_rhs(row, element.source_value())?;
        self.stamp_matrix(n1.0, row, -1.0)?;
        self.stamp_matrix(n2.0, row, 1.0)?;
        Ok(())
    }

    /// 1-based matrix row of the auxiliary current unknown for `branch`.
    fn branch_row(&self, branch: BranchId) -> i32 {
        (self.elements.len() + branch.0) as i32
    }

    /// Accumulate into the matrix at 1-based (i, j). Ground indices
    /// (0 or negative) are a silent no-op.
    fn stamp_matrix(&mut self, i: i32, j: i32, x: f64) -> Result<()> {
        if i <= 0 || j <= 0 {
            return Ok(());
        }
        let (row, col) = ((i - 1) as usize, (j - 1) as usize);
        let size = self.rhs.len();
        if row >= size || col >= size {
            let node = if row >= size { i } else { j };
            return Err(InloopError::NodeOutOfRange { node, size });
        }
        self.matrix.add(row, col, x);
        Ok(())
    }

    /// Accumulate into the rhs at 1-based i. Ground is a silent no-op.
    fn stamp_rhs(&mut self, i: i32, x: f64) -> Result<()> {
        if i <= 0 {
            return Ok(());
        }
        let row = (i - 1) as usize;
        if row >= self.rhs.len() {
            return Err(InloopError::NodeOutOfRange {
                node: i,
                size: self.rhs.len(),
            });
        }
        self.rhs[row] += x;
        Ok(())
    }
}

impl Default for CircuitSystem {
    fn default() -> Self {
        Self::new()
    }
}
