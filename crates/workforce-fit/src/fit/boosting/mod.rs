//! Gradient-boosted regression trees fitted against squared error.
//!
//! Each round fits a [`RegressionTree`] to the current residual gradients using second-order
//! split gain with L2-regularized leaf weights, then shrinks the leaf values by the learning rate.
//! Warm starts append rounds on top of the existing ensemble instead of rebuilding it.

pub mod metrics;
mod tree;

pub use tree::RegressionTree;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::features::FeatureVector;

/// Hyperparameters for one boosting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostingParams {
    pub n_estimators: usize,
    pub max_depth: usize,
    pub learning_rate: f64,
    /// L2 regularization on leaf weights.
    pub lambda: f64,
    pub min_child_weight: f64,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 5,
            learning_rate: 0.1,
            lambda: 1.0,
            min_child_weight: 1.0,
        }
    }
}

/// Error raised when the supplied dataset cannot be boosted.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoostingError {
    #[error("no training data available")]
    EmptyDataset,
    #[error("{features} feature rows but {labels} labels")]
    LabelCountMismatch { features: usize, labels: usize },
    #[error("feature rows must have {expected} values, found a row with {found}")]
    RaggedFeatures { expected: usize, found: usize },
}

/// Additive tree ensemble. The raw output is unbounded; callers clip as needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedRegressor {
    params: BoostingParams,
    base_score: f64,
    feature_count: usize,
    trees: Vec<RegressionTree>,
}

impl GradientBoostedRegressor {
    /// Build a fresh ensemble whose base score is the label mean.
    pub fn fit(
        params: BoostingParams,
        features: &[FeatureVector],
        labels: &[f64],
    ) -> Result<Self, BoostingError> {
        let feature_count = validate(features, labels, None)?;
        let base_score = labels.iter().sum::<f64>() / labels.len() as f64;

        let mut model = Self {
            params,
            base_score,
            feature_count,
            trees: Vec::new(),
        };
        model.boost(features, labels);
        Ok(model)
    }

    /// Warm start: keep every learned tree and append a new batch of rounds fitted to `features`.
    pub fn continue_fit(
        &mut self,
        features: &[FeatureVector],
        labels: &[f64],
    ) -> Result<(), BoostingError> {
        validate(features, labels, Some(self.feature_count))?;
        self.boost(features, labels);
        Ok(())
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|tree| tree.predict(row)).sum::<f64>()
    }

    pub fn params(&self) -> &BoostingParams {
        &self.params
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    fn boost(&mut self, features: &[FeatureVector], labels: &[f64]) {
        let mut predictions: Vec<f64> = features
            .iter()
            .map(|row| self.predict(row.as_slice()))
            .collect();
        let mut gradients = vec![0.0; labels.len()];

        for round in 0..self.params.n_estimators {
            for (gradient, (prediction, label)) in
                gradients.iter_mut().zip(predictions.iter().zip(labels))
            {
                *gradient = prediction - label;
            }

            let tree = RegressionTree::grow(features, &gradients, &self.params);
            for (prediction, row) in predictions.iter_mut().zip(features) {
                *prediction += tree.predict(row.as_slice());
            }
            self.trees.push(tree);

            if round % 25 == 0 {
                let loss = metrics::mean_squared_error(labels, &predictions);
                debug!(round, loss, "boosting round complete");
            }
        }
    }
}

fn validate(
    features: &[FeatureVector],
    labels: &[f64],
    expected_width: Option<usize>,
) -> Result<usize, BoostingError> {
    if features.is_empty() || labels.is_empty() {
        return Err(BoostingError::EmptyDataset);
    }
    if features.len() != labels.len() {
        return Err(BoostingError::LabelCountMismatch {
            features: features.len(),
            labels: labels.len(),
        });
    }

    let expected = expected_width.unwrap_or_else(|| features[0].len());
    if let Some(row) = features.iter().find(|row| row.len() != expected) {
        return Err(BoostingError::RaggedFeatures {
            expected,
            found: row.len(),
        });
    }

    Ok(expected)
}
