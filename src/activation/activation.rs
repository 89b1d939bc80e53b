use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Per-neuron nonlinearity applied after the weighted sum.
///
/// Each variant pairs a forward value `function(x)` with a `derivative(y)`
/// that is evaluated at the **already-computed forward output** `y = f(x)`,
/// never at the raw pre-activation sum. This lets backpropagation reuse the
/// cached layer activations without recomputing weighted sums. The identity
/// is exact for Sigmoid (`f' = f·(1-f)`), Tanh (`f' = 1-f²`) and the
/// sign-branch variants (ReLU, LeakyReLU, Elu, Linear, whose branches are
/// sign-invariant under the monotone, zero-preserving forward map), but for
/// Softplus, Swish and Gelu it is only an approximation of the true
/// derivative, which would need the pre-activation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Sigmoid,
    ReLU,
    Tanh,
    LeakyReLU,
    Softplus,
    Swish,
    Elu,
    Gelu,
    Linear,
}

impl Activation {
    /// Resolves a persisted selector id back to a variant.
    pub fn from_id(id: u32) -> Option<Activation> {
        match id {
            0 => Some(Activation::Sigmoid),
            1 => Some(Activation::ReLU),
            2 => Some(Activation::Tanh),
            3 => Some(Activation::LeakyReLU),
            4 => Some(Activation::Softplus),
            5 => Some(Activation::Swish),
            6 => Some(Activation::Elu),
            7 => Some(Activation::Gelu),
            8 => Some(Activation::Linear),
            _ => None,
        }
    }

    /// Stable numeric id used by the persisted model format.
    pub fn id(&self) -> u32 {
        match self {
            Activation::Sigmoid => 0,
            Activation::ReLU => 1,
            Activation::Tanh => 2,
            Activation::LeakyReLU => 3,
            Activation::Softplus => 4,
            Activation::Swish => 5,
            Activation::Elu => 6,
            Activation::Gelu => 7,
            Activation::Linear => 8,
        }
    }

    /// Forward value `f(x)`.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::ReLU => x.max(0.0),
            Activation::Tanh => x.tanh(),
            Activation::LeakyReLU => {
                if x > 0.0 {
                    x
                } else {
                    0.01 * x
                }
            }
            Activation::Softplus => (1.0 + x.exp()).ln(),
            Activation::Swish => x / (1.0 + (-x).exp()),
            Activation::Elu => {
                if x > 0.0 {
                    x
                } else {
                    x.exp() - 1.0
                }
            }
            Activation::Gelu => {
                let c = (2.0 / PI).sqrt();
                0.5 * x * (1.0 + (c * (x + 0.044715 * x.powi(3))).tanh())
            }
            Activation::Linear => x,
        }
    }

    /// Derivative evaluated at the cached forward output `y = f(x)`.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            Activation::Sigmoid => y * (1.0 - y),
            Activation::ReLU => {
                if y > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Tanh => 1.0 - y * y,
            Activation::LeakyReLU => {
                if y > 0.0 {
                    1.0
                } else {
                    0.01
                }
            }
            // Approximate: sigmoid of the activated output rather than of
            // the pre-activation sum.
            Activation::Softplus => 1.0 / (1.0 + (-y).exp()),
            Activation::Swish => {
                let s = 1.0 / (1.0 + (-y).exp());
                y * s * (1.0 - y * s)
            }
            Activation::Elu => {
                if y > 0.0 {
                    1.0
                } else {
                    y.exp()
                }
            }
            Activation::Gelu => {
                let c = (2.0 / PI).sqrt();
                let t = (c * (y + 0.044715 * y.powi(3))).tanh();
                0.5 * (1.0 + t) + 0.5 * t * t
            }
            Activation::Linear => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_midpoint() {
        assert_eq!(Activation::Sigmoid.function(0.0), 0.5);
    }

    #[test]
    fn sigmoid_derivative_matches_analytic_form() {
        // d/dx sigmoid(x) = e^-x / (1 + e^-x)^2, compared against the
        // cached-output form y·(1-y) with y = sigmoid(x).
        for x in [-5.0, -1.0, 0.0, 1.0, 5.0] {
            let y = Activation::Sigmoid.function(x);
            let analytic = (-x).exp() / (1.0 + (-x).exp()).powi(2);
            assert!(
                (Activation::Sigmoid.derivative(y) - analytic).abs() < 1e-9,
                "mismatch at x = {x}"
            );
        }
    }

    #[test]
    fn tanh_derivative_matches_analytic_form() {
        for x in [-2.0, -0.5, 0.0, 0.5, 2.0] {
            let y = Activation::Tanh.function(x);
            let analytic = 1.0 - x.tanh().powi(2);
            assert!((Activation::Tanh.derivative(y) - analytic).abs() < 1e-9);
        }
    }

    #[test]
    fn relu_branches() {
        assert_eq!(Activation::ReLU.function(-3.0), 0.0);
        assert_eq!(Activation::ReLU.function(3.0), 3.0);
        assert_eq!(Activation::ReLU.derivative(3.0), 1.0);
        assert_eq!(Activation::ReLU.derivative(0.0), 0.0);
    }

    #[test]
    fn leaky_relu_keeps_negative_slope() {
        assert_eq!(Activation::LeakyReLU.function(-2.0), -0.02);
        assert_eq!(Activation::LeakyReLU.derivative(-0.02), 0.01);
    }

    #[test]
    fn linear_is_identity() {
        assert_eq!(Activation::Linear.function(1.5), 1.5);
        assert_eq!(Activation::Linear.derivative(1.5), 1.0);
    }

    #[test]
    fn ids_round_trip() {
        for id in 0..9 {
            let a = Activation::from_id(id).unwrap();
            assert_eq!(a.id(), id);
        }
        assert!(Activation::from_id(9).is_none());
    }
}
