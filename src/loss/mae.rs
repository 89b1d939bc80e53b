pub struct MaeError;

impl MaeError {
    /// Scalar MAE: mean(|predicted - target|)
    pub fn compute(predicted: &[f64], target: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(target.iter())
            .map(|(v, t)| (v - t).abs())
            .sum::<f64>()
            / n
    }
}
