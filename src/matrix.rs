//! Dense 2-D matrix engine.
//!
//! Matrices own a flat row-major `Vec<f64>` buffer together with explicit
//! `rows`/`cols` counts, the same layout the network's weight matrices use.
//! Every binary operation checks dimensions exactly (rows and cols must both
//! match); nothing broadcasts. Each elementwise operation comes as a pair: a
//! pure function returning a new matrix, and a clearly named `_assign`
//! variant mutating the receiver.

use crate::error::TensorNetError;
use crate::nested::NestedArray;
use crate::utils::SimpleRng;
use std::fmt;

/// Dense rows x cols matrix of f64 values, stored row-major.
///
/// Invariant: `data.len() == rows * cols` at all times. Copies are plain
/// value copies; in-place operations mutate the receiver only.
///
/// # Examples
///
/// ```
/// use tensornet::Matrix;
///
/// let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let b = Matrix::from_rows(&[vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
/// let c = Matrix::dot(&a, &b).unwrap();
/// assert_eq!(c.get(0, 0).unwrap(), 19.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a zero-filled matrix with the given dimensions.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wrap an existing flat row-major buffer.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `data.len() != rows * cols`.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, TensorNetError> {
        if data.len() != rows * cols {
            return Err(TensorNetError::DimensionMismatch {
                left_rows: rows,
                left_cols: cols,
                right_rows: 1,
                right_cols: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from nested row data.
    ///
    /// The first row's length defines `cols`; an empty outer slice yields a
    /// 0x0 matrix.
    ///
    /// # Errors
    ///
    /// `RaggedInput` if any later row has a different length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, TensorNetError> {
        if rows.is_empty() {
            return Ok(Self::zeros(0, 0));
        }
        let cols = rows[0].len();
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(TensorNetError::RaggedInput {
                    depth: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build a matrix from an externally supplied nested-array document.
    ///
    /// The outer array's length defines `rows`; every inner array must be a
    /// numeric row of equal length. An empty outer array yields 0x0.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the value is not a rank-2 nesting of numbers,
    /// `RaggedInput` if row lengths vary.
    pub fn from_value(value: &NestedArray) -> Result<Self, TensorNetError> {
        let shape = value.infer_shape()?;
        if shape.first() == Some(&0) {
            return Ok(Self::zeros(0, 0));
        }
        match shape.len() {
            0 | 1 => Err(TensorNetError::InvalidArgument(
                "matrix input must be an array of rows".into(),
            )),
            2 => Ok(Self {
                rows: shape[0],
                cols: shape[1],
                data: value.flatten(),
            }),
            _ => Err(TensorNetError::InvalidArgument(
                "matrix input must not nest deeper than two levels".into(),
            )),
        }
    }

    /// Wrap a flat slice as a 1xN row vector.
    pub fn row_vector(values: &[f64]) -> Self {
        Self {
            rows: 1,
            cols: values.len(),
            data: values.to_vec(),
        }
    }

    /// Replace the contents wholesale, re-deriving the dimensions from the
    /// new row data.
    ///
    /// # Errors
    ///
    /// `RaggedInput` if the rows have differing lengths; the matrix is left
    /// untouched in that case.
    pub fn set_data(&mut self, rows: &[Vec<f64>]) -> Result<(), TensorNetError> {
        *self = Self::from_rows(rows)?;
        Ok(())
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The flat row-major buffer.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Copy the contents out as nested rows (used for persistence).
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols.max(1)).map(<[f64]>::to_vec).collect()
    }

    /// Read the element at (row, col).
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Result<f64, TensorNetError> {
        Ok(self.data[self.offset(row, col)?])
    }

    /// Write the element at (row, col).
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if either index is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), TensorNetError> {
        let idx = self.offset(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize, TensorNetError> {
        if row >= self.rows || col >= self.cols {
            return Err(TensorNetError::IndexOutOfRange {
                index: row * self.cols + col,
                len: self.data.len(),
            });
        }
        Ok(row * self.cols + col)
    }

    fn check_same_dims(&self, other: &Matrix) -> Result<(), TensorNetError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(TensorNetError::DimensionMismatch {
                left_rows: self.rows,
                left_cols: self.cols,
                right_rows: other.rows,
                right_cols: other.cols,
            });
        }
        Ok(())
    }

    /// Elementwise sum of two equally shaped matrices.
    pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix, TensorNetError> {
        a.check_same_dims(b)?;
        let data = a.data.iter().zip(&b.data).map(|(x, y)| x + y).collect();
        Ok(Matrix {
            rows: a.rows,
            cols: a.cols,
            data,
        })
    }

    /// Elementwise difference of two equally shaped matrices.
    pub fn sub(a: &Matrix, b: &Matrix) -> Result<Matrix, TensorNetError> {
        a.check_same_dims(b)?;
        let data = a.data.iter().zip(&b.data).map(|(x, y)| x - y).collect();
        Ok(Matrix {
            rows: a.rows,
            cols: a.cols,
            data,
        })
    }

    /// Elementwise (Hadamard) product of two equally shaped matrices.
    pub fn hadamard(a: &Matrix, b: &Matrix) -> Result<Matrix, TensorNetError> {
        a.check_same_dims(b)?;
        let data = a.data.iter().zip(&b.data).map(|(x, y)| x * y).collect();
        Ok(Matrix {
            rows: a.rows,
            cols: a.cols,
            data,
        })
    }

    /// Add another matrix into this one, elementwise.
    pub fn add_assign(&mut self, other: &Matrix) -> Result<(), TensorNetError> {
        self.check_same_dims(other)?;
        for (x, y) in self.data.iter_mut().zip(&other.data) {
            *x += y;
        }
        Ok(())
    }

    /// Subtract another matrix from this one, elementwise.
    pub fn sub_assign(&mut self, other: &Matrix) -> Result<(), TensorNetError> {
        self.check_same_dims(other)?;
        for (x, y) in self.data.iter_mut().zip(&other.data) {
            *x -= y;
        }
        Ok(())
    }

    /// Multiply this matrix by another, elementwise.
    pub fn hadamard_assign(&mut self, other: &Matrix) -> Result<(), TensorNetError> {
        self.check_same_dims(other)?;
        for (x, y) in self.data.iter_mut().zip(&other.data) {
            *x *= y;
        }
        Ok(())
    }

    /// Add a constant to every element.
    pub fn add_scalar(&mut self, scalar: f64) {
        for x in &mut self.data {
            *x += scalar;
        }
    }

    /// Multiply every element by a constant.
    pub fn scale(&mut self, scalar: f64) {
        for x in &mut self.data {
            *x *= scalar;
        }
    }

    /// Standard matrix product.
    ///
    /// # Errors
    ///
    /// `DotDimensionMismatch` unless `a.cols == b.rows`.
    pub fn dot(a: &Matrix, b: &Matrix) -> Result<Matrix, TensorNetError> {
        if a.cols != b.rows {
            return Err(TensorNetError::DotDimensionMismatch {
                left_cols: a.cols,
                right_rows: b.rows,
            });
        }
        let mut out = Matrix::zeros(a.rows, b.cols);
        for i in 0..a.rows {
            for k in 0..a.cols {
                let aik = a.data[i * a.cols + k];
                for j in 0..b.cols {
                    out.data[i * b.cols + j] += aik * b.data[k * b.cols + j];
                }
            }
        }
        Ok(out)
    }

    /// The transpose as a new matrix.
    pub fn transposed(a: &Matrix) -> Matrix {
        let mut out = Matrix::zeros(a.cols, a.rows);
        for i in 0..a.rows {
            for j in 0..a.cols {
                out.data[j * a.rows + i] = a.data[i * a.cols + j];
            }
        }
        out
    }

    /// Transpose in place.
    pub fn transpose(&mut self) {
        *self = Matrix::transposed(self);
    }

    /// Apply a scalar function to every element, returning a new matrix.
    pub fn map<F: Fn(f64) -> f64>(a: &Matrix, f: F) -> Matrix {
        Matrix {
            rows: a.rows,
            cols: a.cols,
            data: a.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Apply a scalar function to every element in place.
    pub fn map_assign<F: Fn(f64) -> f64>(&mut self, f: F) {
        for x in &mut self.data {
            *x = f(*x);
        }
    }

    /// Fill every element with a uniform random value in [-1, 1].
    pub fn randomize(&mut self, rng: &mut SimpleRng) {
        for x in &mut self.data {
            *x = rng.gen_range_f64(-1.0, 1.0);
        }
    }

    /// Like [`Matrix::randomize`], but rounds each value to one decimal
    /// place for reproducible, human-readable initial weights.
    pub fn randomize_rounded(&mut self, rng: &mut SimpleRng) {
        for x in &mut self.data {
            *x = (rng.gen_range_f64(-1.0, 1.0) * 10.0).round() / 10.0;
        }
    }
}

/// Diagnostic pipe-delimited dump of the grid. Debug aid only; the format
/// carries no compatibility guarantee.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-------------------")?;
        for row in self.data.chunks(self.cols.max(1)) {
            let line = row
                .iter()
                .map(|x| x.to_string())
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
