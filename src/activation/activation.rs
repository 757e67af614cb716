use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Magnitude beyond which the scaled sigmoid and its derivative are clamped.
const SIGMOID_CLAMP_INPUT: f64 = 10.0;
const SIGMOID_CLAMP_OUTPUT: f64 = 0.9999;
const SIGMOID_CLAMP_DERIVATIVE: f64 = 0.0001;

/// Element-wise nonlinearity applied after a layer's affine transform.
///
/// `Sigmoid` is the logistic curve rescaled to the open range (-1, 1):
/// `2 / (1 + e^-x) - 1`, pinned to ±0.9999 once `|x| > 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    None,
    Sigmoid,
    HyperbolicTangent,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::None => x,
            ActivationFunction::Sigmoid => {
                if x > SIGMOID_CLAMP_INPUT {
                    SIGMOID_CLAMP_OUTPUT
                } else if x < -SIGMOID_CLAMP_INPUT {
                    -SIGMOID_CLAMP_OUTPUT
                } else {
                    2.0 / (1.0 + E.powf(-x)) - 1.0
                }
            }
            ActivationFunction::HyperbolicTangent => x.tanh(),
        }
    }

    /// Derivative evaluated at the pre-activation `x`.
    ///
    /// `None` reports `1.0` so that multiplying an error by it is the identity.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::None => 1.0,
            ActivationFunction::Sigmoid => {
                if x.abs() > SIGMOID_CLAMP_INPUT {
                    return SIGMOID_CLAMP_DERIVATIVE;
                }
                let ex = E.powf(x);
                2.0 * ex / (ex + 1.0).powi(2)
            }
            ActivationFunction::HyperbolicTangent => {
                let sech = 1.0 / x.cosh();
                sech * sech
            }
        }
    }

    /// Stable name used by introspection; the input layer reports `"none"`.
    pub fn tag(&self) -> &'static str {
        match self {
            ActivationFunction::None => "none",
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::HyperbolicTangent => "hyperbolic_tangent",
        }
    }
}
