pub struct CceError;

impl CceError {
    /// Scalar categorical cross-entropy: mean(-(t·ln v))
    ///
    /// Same numerical edge case as BCE: a predicted value of exactly 0 with
    /// a non-zero target yields Inf/NaN. Not guarded.
    pub fn compute(predicted: &[f64], target: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(target.iter())
            .map(|(v, t)| -(t * v.ln()))
            .sum::<f64>()
            / n
    }
}
