use rand::Rng;

use crate::error::{NetworkError, Result};

/// Dense row-major matrix. A layer's weights are stored as
/// `neuron_count` rows of `input_count` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Builds a matrix from rows, rejecting ragged input.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map_or(0, |row| row.len());
        if let Some(row) = data.iter().find(|row| row.len() != cols) {
            return Err(NetworkError::DimensionMismatch { expected: cols, actual: row.len() });
        }

        Ok(Matrix {
            rows: data.len(),
            cols,
            data
        })
    }

    /// Overwrites every element in place with a draw from `[-range, range]`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, range: f64, rng: &mut R) -> Result<()> {
        for row in &mut self.data {
            fill_uniform(row, range, rng)?;
        }
        Ok(())
    }

    /// Matrix-vector product `self · v`.
    pub fn dot(&self, v: &[f64]) -> Result<Vec<f64>> {
        if v.len() != self.cols {
            return Err(NetworkError::DimensionMismatch { expected: self.cols, actual: v.len() });
        }

        Ok(self.data
            .iter()
            .map(|row| row.iter().zip(v).map(|(w, x)| w * x).sum())
            .collect())
    }

    /// `selfᵗ · v` without materialising the transpose.
    pub fn transpose_dot(&self, v: &[f64]) -> Result<Vec<f64>> {
        if v.len() != self.rows {
            return Err(NetworkError::DimensionMismatch { expected: self.rows, actual: v.len() });
        }

        let mut res = vec![0.0; self.cols];
        for (row, &scale) in self.data.iter().zip(v) {
            for (acc, w) in res.iter_mut().zip(row) {
                *acc += w * scale;
            }
        }

        Ok(res)
    }

    /// Outer product `a ⊗ b`, shaped `a.len() × b.len()`.
    pub fn outer(a: &[f64], b: &[f64]) -> Matrix {
        Matrix {
            rows: a.len(),
            cols: b.len(),
            data: a.iter()
                .map(|&x| b.iter().map(|&y| x * y).collect())
                .collect()
        }
    }

    /// `self -= scale * other`, in place.
    pub fn sub_scaled(&mut self, other: &Matrix, scale: f64) -> Result<()> {
        if self.rows != other.rows {
            return Err(NetworkError::DimensionMismatch { expected: self.rows, actual: other.rows });
        }
        if self.cols != other.cols {
            return Err(NetworkError::DimensionMismatch { expected: self.cols, actual: other.cols });
        }

        for (row, other_row) in self.data.iter_mut().zip(&other.data) {
            for (x, y) in row.iter_mut().zip(other_row) {
                *x -= scale * y;
            }
        }

        Ok(())
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        self.data.get(i).map(|row| row.as_slice())
    }
}

/// Fills `values` with uniform draws from `[-range, range]`.
pub(crate) fn fill_uniform<R: Rng + ?Sized>(values: &mut [f64], range: f64, rng: &mut R) -> Result<()> {
    if !range.is_finite() {
        return Err(NetworkError::Config(format!("randomisation range must be finite, got {range}")));
    }

    // a unit draw keeps the sampled span finite for any finite range
    let range = range.abs();
    for x in values.iter_mut() {
        *x = if range == 0.0 { 0.0 } else { rng.gen_range(-1.0f64..=1.0) * range };
    }

    Ok(())
}
