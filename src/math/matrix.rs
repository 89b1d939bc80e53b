use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dense 2-D matrix with flat row-major storage.
///
/// Dimensions and cell access use a `(col, row)` argument order throughout,
/// and cell `(col, row)` lives at `values[row * cols + col]`. Every
/// arithmetic operation returns a fresh matrix and leaves its operands
/// untouched; only `set` and `set_values` mutate in place.
///
/// Serializes as `{ "c": cols, "r": rows, "v": [values...] }`, the record
/// shape used inside persisted model documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixData")]
pub struct Matrix {
    #[serde(rename = "c")]
    cols: usize,
    #[serde(rename = "r")]
    rows: usize,
    #[serde(rename = "v")]
    values: Vec<f64>,
}

/// Raw persisted form of a matrix; validated before it becomes a `Matrix`.
#[derive(Deserialize)]
struct MatrixData {
    c: usize,
    r: usize,
    v: Vec<f64>,
}

impl TryFrom<MatrixData> for Matrix {
    type Error = Error;

    fn try_from(data: MatrixData) -> Result<Matrix> {
        if data.v.len() != data.c * data.r {
            return Err(Error::Deserialization(format!(
                "matrix record claims {}x{} but carries {} values",
                data.c,
                data.r,
                data.v.len()
            )));
        }
        Ok(Matrix {
            cols: data.c,
            rows: data.r,
            values: data.v,
        })
    }
}

impl Matrix {
    /// Creates a zero-filled matrix with the given dimensions.
    pub fn new(cols: usize, rows: usize) -> Matrix {
        Matrix {
            cols,
            rows,
            values: vec![0.0; cols * rows],
        }
    }

    /// Creates a single-row matrix backed by the given values.
    pub fn from_slice(values: &[f64]) -> Matrix {
        Matrix {
            cols: values.len(),
            rows: 1,
            values: values.to_vec(),
        }
    }

    /// Creates a matrix filled with uniform `[0, 1)` draws from `rng`.
    pub fn random<R: Rng + ?Sized>(cols: usize, rows: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::new(cols, rows);
        for v in res.values.iter_mut() {
            *v = rng.gen::<f64>();
        }
        res
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The backing storage, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the value at `(col, row)`.
    pub fn at(&self, col: usize, row: usize) -> Result<f64> {
        self.check_bounds(col, row)?;
        Ok(self.values[row * self.cols + col])
    }

    /// Assigns `v` to the cell at `(col, row)` in place.
    pub fn set(&mut self, col: usize, row: usize, v: f64) -> Result<()> {
        self.check_bounds(col, row)?;
        self.values[row * self.cols + col] = v;
        Ok(())
    }

    /// Bulk-replaces the backing storage; the new values must match the
    /// current `cols * rows`.
    pub fn set_values(&mut self, values: Vec<f64>) -> Result<()> {
        if values.len() != self.values.len() {
            return Err(Error::SizeMismatch {
                expected: self.values.len(),
                actual: values.len(),
            });
        }
        self.values = values;
        Ok(())
    }

    /// Matrix product. Requires `self.cols == other.rows`; the result has
    /// shape `(other.cols x self.rows)`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(self.shape_mismatch(other));
        }

        let mut res = Matrix::new(other.cols, self.rows);
        for y in 0..res.rows {
            for x in 0..res.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.values[y * self.cols + k] * other.values[k * other.cols + x];
                }
                res.values[y * res.cols + x] = sum;
            }
        }
        Ok(res)
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn multiply_elements(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.cols || self.rows != other.rows {
            return Err(self.shape_mismatch(other));
        }

        let mut res = Matrix::new(self.cols, self.rows);
        for (i, v) in res.values.iter_mut().enumerate() {
            *v = self.values[i] * other.values[i];
        }
        Ok(res)
    }

    /// Element-wise sum of two same-shape matrices.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.cols || self.rows != other.rows {
            return Err(self.shape_mismatch(other));
        }

        let mut res = Matrix::new(self.cols, self.rows);
        for (i, v) in res.values.iter_mut().enumerate() {
            *v = self.values[i] + other.values[i];
        }
        Ok(res)
    }

    /// Multiplies every element by a scalar.
    pub fn multiply_scalar(&self, v: f64) -> Matrix {
        self.apply(|x| x * v)
    }

    /// Adds a scalar to every element.
    pub fn add_scalar(&self, v: f64) -> Matrix {
        self.apply(|x| x + v)
    }

    /// Negates every element.
    pub fn negative(&self) -> Matrix {
        self.apply(|x| -x)
    }

    /// Returns the transpose: dimensions swapped, values permuted.
    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::new(self.rows, self.cols);
        for y in 0..res.rows {
            for x in 0..res.cols {
                res.values[y * res.cols + x] = self.values[x * self.cols + y];
            }
        }
        res
    }

    /// Returns a new matrix with `f` applied to every element.
    pub fn apply<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            cols: self.cols,
            rows: self.rows,
            values: self.values.iter().map(|&x| f(x)).collect(),
        }
    }

    fn check_bounds(&self, col: usize, row: usize) -> Result<()> {
        if col >= self.cols || row >= self.rows {
            return Err(Error::IndexOutOfRange {
                col,
                row,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(())
    }

    fn shape_mismatch(&self, other: &Matrix) -> Error {
        Error::ShapeMismatch {
            left_cols: self.cols,
            left_rows: self.rows,
            right_cols: other.cols,
            right_rows: other.rows,
        }
    }
}
