/// Mean squared error between targets and predictions. Returns 0 for empty input.
pub fn mean_squared_error(targets: &[f64], predictions: &[f64]) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }
    let total: f64 = targets
        .iter()
        .zip(predictions)
        .map(|(target, prediction)| (target - prediction).powi(2))
        .sum();
    total / targets.len() as f64
}

/// Coefficient of determination.
///
/// Constant targets have no variance to explain: a perfect fit scores 1.0, anything else 0.0.
pub fn r2_score(targets: &[f64], predictions: &[f64]) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }
    let mean = targets.iter().sum::<f64>() / targets.len() as f64;
    let residual: f64 = targets
        .iter()
        .zip(predictions)
        .map(|(target, prediction)| (target - prediction).powi(2))
        .sum();
    let total: f64 = targets.iter().map(|target| (target - mean).powi(2)).sum();

    if total == 0.0 {
        return if residual == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - residual / total
}
