pub struct MseError;

impl MseError {
    /// Scalar MSE: mean((predicted - target)²)
    pub fn compute(predicted: &[f64], target: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(target.iter())
            .map(|(v, t)| (v - t).powi(2))
            .sum::<f64>()
            / n
    }
}
