use serde::{Deserialize, Serialize};

use crate::loss::bce::BceError;
use crate::loss::cce::CceError;
use crate::loss::mae::MaeError;
use crate::loss::mse::MseError;

/// Selects the scalar error measure used for the reported training error and
/// for the early-stop decision.
///
/// - `MeanSquaredError`       — mean((v-t)²); safe with any output range.
/// - `MeanAbsoluteError`      — mean(|v-t|); safe with any output range.
/// - `BinaryCrossEntropy`     — pair with a Sigmoid output.
/// - `CategoricalCrossEntropy`— pair with a softmax-normalized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorFunction {
    MeanSquaredError,
    MeanAbsoluteError,
    BinaryCrossEntropy,
    CategoricalCrossEntropy,
}

impl ErrorFunction {
    /// Resolves a persisted selector id back to a variant.
    pub fn from_id(id: u32) -> Option<ErrorFunction> {
        match id {
            0 => Some(ErrorFunction::MeanSquaredError),
            1 => Some(ErrorFunction::MeanAbsoluteError),
            2 => Some(ErrorFunction::BinaryCrossEntropy),
            3 => Some(ErrorFunction::CategoricalCrossEntropy),
            _ => None,
        }
    }

    /// Stable numeric id used by the persisted model format.
    pub fn id(&self) -> u32 {
        match self {
            ErrorFunction::MeanSquaredError => 0,
            ErrorFunction::MeanAbsoluteError => 1,
            ErrorFunction::BinaryCrossEntropy => 2,
            ErrorFunction::CategoricalCrossEntropy => 3,
        }
    }

    /// Scalar error of a prediction against its target.
    pub fn compute(&self, predicted: &[f64], target: &[f64]) -> f64 {
        match self {
            ErrorFunction::MeanSquaredError => MseError::compute(predicted, target),
            ErrorFunction::MeanAbsoluteError => MaeError::compute(predicted, target),
            ErrorFunction::BinaryCrossEntropy => BceError::compute(predicted, target),
            ErrorFunction::CategoricalCrossEntropy => CceError::compute(predicted, target),
        }
    }
}
