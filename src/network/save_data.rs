use serde::{Deserialize, Serialize};

use crate::math::matrix::Matrix;

/// Flattened, serializable projection of a trained network.
///
/// Carries exactly what reconstruction needs: topology, per-layer weight and
/// bias matrices, the learning rate, and the numeric registry ids of the
/// activation and error functions. The per-layer activation cache is not
/// persisted; import rebuilds it zeroed and sized from the topology.
///
/// Field names are the stable short keys of the persisted document:
/// `t`, `w`, `b`, `l`, `f`, `e`. The `e` key was added after the first
/// format revision and defaults to 0 (mean squared error) when absent, so
/// older documents still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(rename = "t")]
    pub topology: Vec<u32>,
    #[serde(rename = "w")]
    pub weight_matrices: Vec<Matrix>,
    #[serde(rename = "b")]
    pub bias_matrices: Vec<Matrix>,
    #[serde(rename = "l")]
    pub learning_rate: f64,
    #[serde(rename = "f")]
    pub activation: u32,
    #[serde(rename = "e", default)]
    pub error_function: u32,
}
