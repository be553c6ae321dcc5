use serde::{Deserialize, Serialize};
use tracing::info;

use super::boosting::{metrics, BoostingError, BoostingParams, GradientBoostedRegressor};
use super::dataset::{train_test_split, TrainingSet};
use super::features::FeatureVector;

/// Caller-selected training mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingMode {
    #[default]
    Full,
    Incremental,
}

impl TrainingMode {
    pub fn from_incremental_flag(incremental: bool) -> Self {
        if incremental {
            Self::Incremental
        } else {
            Self::Full
        }
    }
}

/// Hyperparameters plus the hold-out policy for full training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerSettings {
    pub boosting: BoostingParams,
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            boosting: BoostingParams::default(),
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

/// Outcome of a training call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TrainingReport {
    Full {
        /// Hold-out error; absent when the dataset was too small to hold anything out.
        mse: Option<f64>,
        r2: Option<f64>,
        train_sample_count: usize,
        test_sample_count: usize,
    },
    Incremental {
        new_sample_count: usize,
    },
}

impl TrainingReport {
    pub fn mode(&self) -> TrainingMode {
        match self {
            TrainingReport::Full { .. } => TrainingMode::Full,
            TrainingReport::Incremental { .. } => TrainingMode::Incremental,
        }
    }
}

/// Error raised by the trainer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TrainError {
    #[error("cannot train on an empty dataset")]
    EmptyDataset,
    #[error("feature rows encode {found} values but the vocabulary expects {expected}")]
    VocabularyMismatch { expected: usize, found: usize },
    #[error(transparent)]
    Boosting(#[from] BoostingError),
}

/// Fit a fresh model on 80% of the rows and score it on the held-out rest.
pub(crate) fn train_full(
    settings: &TrainerSettings,
    data: &TrainingSet,
) -> Result<(GradientBoostedRegressor, TrainingReport), TrainError> {
    if data.is_empty() {
        return Err(TrainError::EmptyDataset);
    }

    let split = train_test_split(data.len(), settings.test_fraction, settings.seed);
    let (train_x, train_y) = select(data, &split.train);
    let (test_x, test_y) = select(data, &split.test);

    info!(
        train = train_y.len(),
        test = test_y.len(),
        "full model training"
    );
    let model = GradientBoostedRegressor::fit(settings.boosting.clone(), &train_x, &train_y)?;

    let (mse, r2) = if test_y.is_empty() {
        (None, None)
    } else {
        let predictions: Vec<f64> = test_x
            .iter()
            .map(|row| model.predict(row.as_slice()))
            .collect();
        (
            Some(metrics::mean_squared_error(&test_y, &predictions)),
            Some(metrics::r2_score(&test_y, &predictions)),
        )
    };

    let report = TrainingReport::Full {
        mse,
        r2,
        train_sample_count: train_y.len(),
        test_sample_count: test_y.len(),
    };
    Ok((model, report))
}

/// Warm-start `model` on the new rows only.
pub(crate) fn train_incremental(
    model: &mut GradientBoostedRegressor,
    data: &TrainingSet,
) -> Result<TrainingReport, TrainError> {
    if data.is_empty() {
        return Err(TrainError::EmptyDataset);
    }

    info!(samples = data.len(), "incremental training with new data");
    model.continue_fit(&data.features, &data.labels)?;

    Ok(TrainingReport::Incremental {
        new_sample_count: data.len(),
    })
}

fn select(data: &TrainingSet, indices: &[usize]) -> (Vec<FeatureVector>, Vec<f64>) {
    indices
        .iter()
        .map(|&i| (data.features[i].clone(), data.labels[i]))
        .unzip()
}
