//! Small element-wise helpers over `f64` slices.

use crate::error::{NetworkError, Result};

/// Index of the first maximum element, `None` for an empty slice.
///
/// Ties resolve to the lowest index; NaN elements are skipped.
pub fn max_index(v: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &x) in v.iter().enumerate() {
        if x.is_nan() {
            continue;
        }
        match best {
            Some((_, max)) if x <= max => {}
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

pub fn sum(v: &[f64]) -> f64 {
    v.iter().sum()
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    sum(v) / v.len() as f64
}

/// Population standard deviation around `mean`; `0.0` for an empty slice.
pub fn standard_deviation(v: &[f64], mean: f64) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    let variance = v.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / v.len() as f64;
    variance.sqrt()
}

/// Element-wise (Hadamard) product of two same-length slices.
pub fn hadamard(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_len(a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}

/// `v -= scale * other`, in place.
pub fn sub_scaled(v: &mut [f64], other: &[f64], scale: f64) -> Result<()> {
    check_len(v.len(), other.len())?;
    for (x, y) in v.iter_mut().zip(other) {
        *x -= scale * y;
    }
    Ok(())
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(NetworkError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
