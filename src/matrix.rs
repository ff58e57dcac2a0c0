//! Dense row-major matrix storage.
//!
//! One generic container covers the three element types that flow through
//! the system: `Matrix<f64>` for the stamped MNA system, `Matrix<f32>` for
//! the float-valued wire roles, and `Matrix<i8>` for the topology matrix.

use crate::error::{InloopError, Result};

/// A dense matrix stored row-major in a flat buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Matrix<T> {
    /// Create a rows x cols matrix filled with the default element (zero
    /// for all numeric types used here).
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }

    /// Build a matrix from row slices. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(InloopError::RaggedRows {
                    row: i,
                    len: row.len(),
                    expected: n_cols,
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Build an n x 1 column vector.
    pub fn column(values: Vec<T>) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Set the element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// The flat row-major element buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Check for a square shape.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Check for an n x 1 column-vector shape.
    pub fn is_column(&self) -> bool {
        self.cols == 1
    }

    /// Apply `f` to every element, producing a matrix of another element
    /// type with the same shape.
    pub fn map<U: Copy + Default>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

impl<T: Copy + Default + std::ops::AddAssign> Matrix<T> {
    /// Add to the element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] += value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_shape() {
        let m: Matrix<f64> = Matrix::zeros(3, 2);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 2);
        assert_eq!(m.data().len(), 6);
        assert!(m.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_rows_row_major_order() {
        let m = Matrix::from_rows(vec![vec![1i8, -1, 0], vec![0, 1, -1]]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.data(), &[1, -1, 0, 0, 1, -1]);
        assert_eq!(m.get(1, 2), -1);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let result = Matrix::from_rows(vec![vec![1.0f32, 2.0], vec![3.0]]);
        assert!(matches!(
            result,
            Err(InloopError::RaggedRows {
                row: 1,
                len: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_column_vector() {
        let v = Matrix::column(vec![1.0f32, 2.0, 3.0]);
        assert!(v.is_column());
        assert!(!v.is_square());
        assert_eq!(v.rows(), 3);
        assert_eq!(v.get(2, 0), 3.0);
    }

    #[test]
    fn test_add_accumulates() {
        let mut m: Matrix<f64> = Matrix::zeros(2, 2);
        m.add(0, 1, 2.5);
        m.add(0, 1, -1.0);
        assert_eq!(m.get(0, 1), 1.5);
    }

    #[test]
    fn test_map_converts_element_type() {
        let m = Matrix::from_rows(vec![vec![1.0f64, 2.0], vec![3.0, 4.0]]).unwrap();
        let f = m.map(|v| v as f32);
        assert_eq!(f.get(1, 0), 3.0f32);
        assert_eq!(f.rows(), 2);
        assert_eq!(f.cols(), 2);
    }
}
