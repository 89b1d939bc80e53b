use std::fs::File;
use std::io::{BufReader, BufWriter};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::activation::activation::Activation;
use crate::data::training_data::TrainingData;
use crate::error::{Error, Result};
use crate::loss::error_function::ErrorFunction;
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;
use crate::network::save_data::SaveData;

/// Fully-connected feedforward network trained by online gradient descent.
///
/// Owns one weight and one bias matrix per layer transition plus a cached
/// value matrix per layer (input and output included). `feed_forward`
/// overwrites the value cache, `back_propagate` mutates the weights and
/// biases in place; a network must therefore be exclusively owned by one
/// training task at a time.
pub struct Network {
    topology: Vec<u32>,
    weight_matrices: Vec<Matrix>,
    bias_matrices: Vec<Matrix>,
    value_matrices: Vec<Matrix>,
    learning_rate: f64,
    activation: Activation,
    error_function: ErrorFunction,
    softmax_output: bool,
    debug: bool,
}

impl Network {
    /// Builds a network from `config`, randomizing weights and biases with
    /// ambient entropy.
    pub fn new(config: &NetworkConfig) -> Result<Network> {
        Network::with_rng(config, &mut StdRng::from_entropy())
    }

    /// Builds a network from `config` with a deterministic random source,
    /// for reproducible initialization.
    pub fn new_seeded(config: &NetworkConfig, seed: u64) -> Result<Network> {
        Network::with_rng(config, &mut StdRng::seed_from_u64(seed))
    }

    /// Builds a network from `config`, drawing the initial weights and
    /// biases uniformly from `[0, 1)` out of `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Result<Network> {
        if config.topology.len() < 2 {
            return Err(Error::InvalidConfig(format!(
                "topology needs at least an input and an output layer, got {} layers",
                config.topology.len()
            )));
        }
        if !(config.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning rate must be positive, got {}",
                config.learning_rate
            )));
        }

        let mut weight_matrices = Vec::with_capacity(config.topology.len() - 1);
        let mut bias_matrices = Vec::with_capacity(config.topology.len() - 1);
        for pair in config.topology.windows(2) {
            let (from, to) = (pair[0] as usize, pair[1] as usize);
            weight_matrices.push(Matrix::random(to, from, rng));
            bias_matrices.push(Matrix::random(to, 1, rng));
        }

        let value_matrices = config
            .topology
            .iter()
            .map(|&t| Matrix::new(t as usize, 1))
            .collect();

        Ok(Network {
            topology: config.topology.clone(),
            weight_matrices,
            bias_matrices,
            value_matrices,
            learning_rate: config.learning_rate,
            activation: config.activation,
            error_function: config.error_function,
            softmax_output: config.softmax_output,
            debug: config.debug,
        })
    }

    pub fn topology(&self) -> &[u32] {
        &self.topology
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn error_function(&self) -> ErrorFunction {
        self.error_function
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, v: bool) {
        self.debug = v;
    }

    /// Runs the network forward, caching every layer's values.
    ///
    /// Each transition computes `activation(values · weights + bias)`; the
    /// value cache keeps the input fed into each transition and, in the last
    /// slot, the network's prediction. With `softmax_output` set, the output
    /// layer is replaced by its softmax distribution afterwards.
    pub fn feed_forward(&mut self, input: &[f64]) -> Result<()> {
        if input.len() != self.topology[0] as usize {
            return Err(Error::SizeMismatch {
                expected: self.topology[0] as usize,
                actual: input.len(),
            });
        }

        let activation = self.activation;
        let mut values = Matrix::from_slice(input);
        for i in 0..self.weight_matrices.len() {
            let next = values
                .multiply(&self.weight_matrices[i])?
                .add(&self.bias_matrices[i])?
                .apply(|x| activation.function(x));
            self.value_matrices[i] = values;
            values = next;
        }

        if self.softmax_output {
            let normalized = softmax(values.values());
            values.set_values(normalized)?;
        }

        let last = self.value_matrices.len() - 1;
        self.value_matrices[last] = values;
        Ok(())
    }

    /// Propagates the output error backward, updating every weight and bias
    /// matrix in place.
    ///
    /// The output error is `target − predicted`, which makes the update
    /// additive: each weight delta is the outer product of the layer's
    /// cached input and the learning-rate-scaled gradient, added straight
    /// onto the weight matrix. Error flows to the previous layer through the
    /// pre-update weight transpose.
    pub fn back_propagate(&mut self, target: &[f64]) -> Result<()> {
        let last = self.topology.len() - 1;
        if target.len() != self.topology[last] as usize {
            return Err(Error::SizeMismatch {
                expected: self.topology[last] as usize,
                actual: target.len(),
            });
        }

        let activation = self.activation;
        let mut errors = Matrix::from_slice(target).add(&self.value_matrices[last].negative())?;

        for i in (0..self.weight_matrices.len()).rev() {
            let prev_errors = errors.multiply(&self.weight_matrices[i].transpose())?;

            let d_outputs = self.value_matrices[i + 1].apply(|y| activation.derivative(y));
            let gradients = errors
                .multiply_elements(&d_outputs)?
                .multiply_scalar(self.learning_rate);
            let weight_gradients = self.value_matrices[i].transpose().multiply(&gradients)?;

            self.weight_matrices[i] = self.weight_matrices[i].add(&weight_gradients)?;
            self.bias_matrices[i] = self.bias_matrices[i].add(&gradients)?;

            errors = prev_errors;
        }
        Ok(())
    }

    /// Runs a single feed-forward pass and returns the output layer.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.feed_forward(input)?;
        Ok(self.value_matrices[self.value_matrices.len() - 1]
            .values()
            .to_vec())
    }

    /// Trains on `data` for up to `data.iterations` epochs and returns the
    /// mean test error of the last completed epoch.
    ///
    /// Every epoch runs one feed-forward/backpropagation pair per training
    /// row, then evaluates the error function over the whole test partition.
    /// Training stops early once every test row's error and the mean test
    /// error are within `data.target_error`. The first feed-forward or
    /// backpropagation failure aborts training immediately; the weights keep
    /// whatever updates were applied before the failing row.
    pub fn train(&mut self, data: &mut TrainingData) -> Result<f64> {
        data.prepare();

        if self.debug {
            info!(
                topology = ?self.topology,
                training_rows = data.training_count(),
                test_rows = data.test_count(),
                "training started"
            );
        }

        let mut mean_error = 0.0;
        for epoch in 0..data.iterations {
            while let Some(row) = data.next_row() {
                self.feed_forward(&row.input)?;
                self.back_propagate(&row.output)?;
            }

            let test_count = data.test_count();
            let mut within_tolerance = test_count > 0;
            let mut error_sum = 0.0;
            for row in data.test_data() {
                let prediction = self.predict(&row.input)?;
                let row_error = self.error_function.compute(&prediction, &row.output);
                if row_error > data.target_error {
                    within_tolerance = false;
                }
                error_sum += row_error;
            }
            mean_error = if test_count > 0 {
                error_sum / test_count as f64
            } else {
                0.0
            };

            if self.debug {
                debug!(epoch, mean_error, "epoch complete");
            }

            if within_tolerance && mean_error <= data.target_error {
                if self.debug {
                    info!(epoch, mean_error, "early stop: test error within tolerance");
                }
                return Ok(mean_error);
            }
        }

        if self.debug {
            info!(mean_error, "training complete: iteration limit reached");
        }
        Ok(mean_error)
    }

    /// Copies the network into its serializable snapshot form.
    pub fn to_save_data(&self) -> SaveData {
        SaveData {
            topology: self.topology.clone(),
            weight_matrices: self.weight_matrices.clone(),
            bias_matrices: self.bias_matrices.clone(),
            learning_rate: self.learning_rate,
            activation: self.activation.id(),
            error_function: self.error_function.id(),
        }
    }

    /// Reconstructs a network from a snapshot. Weights and biases are taken
    /// verbatim; the value cache is rebuilt zeroed from the topology; the
    /// function selectors are re-resolved through the registries.
    pub fn from_save_data(sd: SaveData) -> Result<Network> {
        if sd.topology.len() < 2 {
            return Err(Error::Deserialization(format!(
                "topology carries {} layers, need at least 2",
                sd.topology.len()
            )));
        }

        let transitions = sd.topology.len() - 1;
        if sd.weight_matrices.len() != transitions || sd.bias_matrices.len() != transitions {
            return Err(Error::Deserialization(format!(
                "expected {} weight and bias matrices, got {} and {}",
                transitions,
                sd.weight_matrices.len(),
                sd.bias_matrices.len()
            )));
        }

        for (i, pair) in sd.topology.windows(2).enumerate() {
            let (from, to) = (pair[0] as usize, pair[1] as usize);
            let w = &sd.weight_matrices[i];
            if w.cols() != to || w.rows() != from {
                return Err(Error::Deserialization(format!(
                    "weight matrix {} is {}x{}, expected {}x{}",
                    i,
                    w.cols(),
                    w.rows(),
                    to,
                    from
                )));
            }
            let b = &sd.bias_matrices[i];
            if b.cols() != to || b.rows() != 1 {
                return Err(Error::Deserialization(format!(
                    "bias matrix {} is {}x{}, expected {}x1",
                    i,
                    b.cols(),
                    b.rows(),
                    to
                )));
            }
        }

        let activation = Activation::from_id(sd.activation).ok_or_else(|| {
            Error::Deserialization(format!("unknown activation function id {}", sd.activation))
        })?;
        let error_function = ErrorFunction::from_id(sd.error_function).ok_or_else(|| {
            Error::Deserialization(format!("unknown error function id {}", sd.error_function))
        })?;

        let value_matrices = sd
            .topology
            .iter()
            .map(|&t| Matrix::new(t as usize, 1))
            .collect();

        Ok(Network {
            topology: sd.topology,
            weight_matrices: sd.weight_matrices,
            bias_matrices: sd.bias_matrices,
            value_matrices,
            learning_rate: sd.learning_rate,
            activation,
            error_function,
            softmax_output: false,
            debug: false,
        })
    }

    /// Serializes the snapshot to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_save_data())?)
    }

    /// Reconstructs a network from a snapshot JSON string.
    pub fn from_json(json: &str) -> Result<Network> {
        let sd: SaveData = serde_json::from_str(json)?;
        Network::from_save_data(sd)
    }

    /// Writes the snapshot to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.to_save_data())?;
        Ok(())
    }

    /// Reads a snapshot from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<Network> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let sd: SaveData = serde_json::from_reader(reader)?;
        Network::from_save_data(sd)
    }
}

/// Numerically stable softmax: exponentials are shifted by the maximum
/// before normalization so large outputs cannot overflow.
fn softmax(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|&v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
