use crate::activation::activation::Activation;
use crate::loss::error_function::ErrorFunction;

/// Everything needed to construct a [`crate::Network`].
///
/// `new` applies the stock defaults: learning rate 0.1, Sigmoid activation,
/// mean-squared error, no output normalization, quiet training.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Neuron counts per layer, input through output. Must have at least an
    /// input and an output layer.
    pub topology: Vec<u32>,
    /// Gradient scale applied at every backpropagation step; must be > 0.
    pub learning_rate: f64,
    /// Activation applied after every layer's weighted sum.
    pub activation: Activation,
    /// Error measure used for test evaluation and early stopping.
    pub error_function: ErrorFunction,
    /// When set, the output layer is renormalized into a probability
    /// distribution by a softmax after every feed-forward pass.
    pub softmax_output: bool,
    /// When set, the training loop emits per-epoch tracing events.
    pub debug: bool,
}

impl NetworkConfig {
    pub fn new(topology: Vec<u32>) -> NetworkConfig {
        NetworkConfig {
            topology,
            learning_rate: 0.1,
            activation: Activation::Sigmoid,
            error_function: ErrorFunction::MeanSquaredError,
            softmax_output: false,
            debug: false,
        }
    }
}
