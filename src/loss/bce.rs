pub struct BceError;

impl BceError {
    /// Scalar BCE: mean(-(t·ln v + (1-t)·ln(1-v)))
    ///
    /// Known numerical edge case: predicted values of exactly 0 or 1 drive
    /// the log terms to -inf, producing Inf/NaN. Callers pairing this with a
    /// Sigmoid output stay in the open interval in practice; no epsilon
    /// clamping is applied here.
    pub fn compute(predicted: &[f64], target: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(target.iter())
            .map(|(v, t)| -(t * v.ln() + (1.0 - t) * (1.0 - v).ln()))
            .sum::<f64>()
            / n
    }
}
