use crate::error::{NetworkError, Result};

pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²); `0.0` for empty vectors.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> Result<f64> {
        check_lengths(predicted, expected)?;
        if predicted.is_empty() {
            return Ok(0.0);
        }
        let n = predicted.len() as f64;
        Ok(predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n)
    }

    /// Per-output delta: predicted - expected
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Result<Vec<f64>> {
        check_lengths(predicted, expected)?;
        Ok(predicted.iter().zip(expected.iter())
            .map(|(a, b)| a - b)
            .collect())
    }
}

fn check_lengths(predicted: &[f64], expected: &[f64]) -> Result<()> {
    if predicted.len() != expected.len() {
        return Err(NetworkError::DimensionMismatch {
            expected: predicted.len(),
            actual: expected.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn loss_and_derivative() {
        assert_relative_eq!(MseLoss::loss(&[1.0, 0.0], &[0.0, 0.0]).unwrap(), 0.5);
        assert_eq!(MseLoss::derivative(&[0.5, -0.5], &[1.0, 0.0]).unwrap(), vec![-0.5, -0.5]);
        assert_eq!(MseLoss::loss(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn mismatched_lengths_fail() {
        assert!(MseLoss::derivative(&[1.0], &[1.0, 2.0]).is_err());
    }
}
