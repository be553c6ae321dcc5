use std::path::Path;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{info, warn};

use super::artifact::{self, ArtifactError, ModelArtifact};
use super::boosting::GradientBoostedRegressor;
use super::confidence;
use super::dataset::{self, TrainingSet};
use super::domain::{AssignmentRecord, RoleFeatures, RoleRecord, WorkerFeatures, WorkerRecord};
use super::features::{extract_features, SkillVocabulary};
use super::heuristic::HeuristicScorer;
use super::policy::FitPolicy;
use super::trainer::{self, TrainError, TrainerSettings, TrainingMode, TrainingReport};

/// A trained regressor together with the vocabulary its inputs were encoded against.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    pub regressor: GradientBoostedRegressor,
    pub vocabulary: SkillVocabulary,
}

/// Whether predictions come from a learned model or the heuristic fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineState {
    NoModel,
    Loaded(TrainedModel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    Model,
    Heuristic,
}

/// Fit score in `[0, 1]` and the independent confidence attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitPrediction {
    pub fit_score: f64,
    pub confidence: f64,
    pub source: PredictionSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub vocabulary_size: usize,
    pub tree_count: usize,
}

/// Owns the model/vocabulary pair behind one reader-writer lock.
///
/// Fitting and artifact IO run without the lock held; the write side is only taken to swap a
/// finished model in, so `predict` and `status` never wait on a training run.
pub struct FitEngine {
    policy: FitPolicy,
    trainer: TrainerSettings,
    heuristic: HeuristicScorer,
    state: RwLock<EngineState>,
}

impl Default for FitEngine {
    fn default() -> Self {
        Self::new(FitPolicy::default(), TrainerSettings::default())
    }
}

impl FitEngine {
    pub fn new(policy: FitPolicy, trainer: TrainerSettings) -> Self {
        let heuristic = HeuristicScorer::new(policy.heuristic.clone());
        Self {
            policy,
            trainer,
            heuristic,
            state: RwLock::new(EngineState::NoModel),
        }
    }

    pub fn policy(&self) -> &FitPolicy {
        &self.policy
    }

    pub fn trainer_settings(&self) -> &TrainerSettings {
        &self.trainer
    }

    /// Build a labeled dataset and the vocabulary for the next training round.
    ///
    /// The bound vocabulary is left alone until [`FitEngine::train`] succeeds.
    pub fn prepare_training_data(
        &self,
        assignments: &[AssignmentRecord],
        workers: &[WorkerRecord],
        roles: &[RoleRecord],
    ) -> TrainingSet {
        dataset::prepare_training_data(assignments, workers, roles, self.policy.vocabulary_cap)
    }

    pub fn train(
        &self,
        data: &TrainingSet,
        mode: TrainingMode,
    ) -> Result<TrainingReport, TrainError> {
        if data.is_empty() {
            return Err(TrainError::EmptyDataset);
        }
        let expected = data.vocabulary.feature_len();
        if let Some(row) = data.features.iter().find(|row| row.len() != expected) {
            return Err(TrainError::VocabularyMismatch {
                expected,
                found: row.len(),
            });
        }

        if mode == TrainingMode::Incremental {
            let warm = match &*self.state.read() {
                EngineState::Loaded(model) if model.vocabulary == data.vocabulary => {
                    Some(model.regressor.clone())
                }
                EngineState::Loaded(_) => {
                    warn!("skill vocabulary changed since last training; running full training");
                    None
                }
                EngineState::NoModel => {
                    info!("no model to warm start; running full training");
                    None
                }
            };
            if let Some(mut regressor) = warm {
                let report = trainer::train_incremental(&mut regressor, data)?;
                self.install(regressor, data.vocabulary.clone());
                return Ok(report);
            }
        }

        let (regressor, report) = trainer::train_full(&self.trainer, data)?;
        self.install(regressor, data.vocabulary.clone());
        Ok(report)
    }

    /// Swap in a freshly fitted model. Fitting happens outside the lock so readers keep scoring
    /// against the previous model until this point.
    fn install(&self, regressor: GradientBoostedRegressor, vocabulary: SkillVocabulary) {
        *self.state.write() = EngineState::Loaded(TrainedModel {
            regressor,
            vocabulary,
        });
    }

    /// Score a worker for a role, falling back to the heuristic when no model is bound.
    pub fn predict(&self, worker: &WorkerFeatures, role: &RoleFeatures) -> FitPrediction {
        let state = self.state.read();
        match &*state {
            EngineState::NoModel => FitPrediction {
                fit_score: self.heuristic.score(worker, role),
                confidence: self.heuristic.confidence(),
                source: PredictionSource::Heuristic,
            },
            EngineState::Loaded(model) => {
                let features = extract_features(worker, role, &model.vocabulary);
                let raw = model.regressor.predict(features.as_slice());
                FitPrediction {
                    fit_score: raw.clamp(0.0, 1.0),
                    confidence: confidence::estimate(&self.policy.confidence, worker, role),
                    source: PredictionSource::Model,
                }
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let artifact = match &*self.state.read() {
            EngineState::Loaded(model) => {
                ModelArtifact::new(model.regressor.clone(), model.vocabulary.clone())
            }
            EngineState::NoModel => return Err(ArtifactError::NoModel),
        };

        artifact::write(path, &artifact)?;
        info!(path = %path.display(), "saved fit model");
        Ok(())
    }

    /// Restore a saved model. A missing, corrupt, or incompatible artifact leaves the engine as it
    /// was and returns `false`.
    pub fn load(&self, path: &Path) -> bool {
        match self.try_load(path) {
            Ok(()) => true,
            Err(ArtifactError::Missing(_)) => {
                info!(path = %path.display(), "no saved fit model; using heuristic scoring");
                false
            }
            Err(err) => {
                warn!(error = %err, "ignoring unusable fit model artifact");
                false
            }
        }
    }

    pub fn try_load(&self, path: &Path) -> Result<(), ArtifactError> {
        let artifact = artifact::read(path)?;
        info!(
            path = %path.display(),
            vocabulary = artifact.vocabulary.len(),
            trees = artifact.model.tree_count(),
            "loaded fit model"
        );
        self.install(artifact.model, artifact.vocabulary);
        Ok(())
    }

    pub fn status(&self) -> EngineStatus {
        match &*self.state.read() {
            EngineState::NoModel => EngineStatus {
                model_loaded: false,
                vocabulary_size: 0,
                tree_count: 0,
            },
            EngineState::Loaded(model) => EngineStatus {
                model_loaded: true,
                vocabulary_size: model.vocabulary.len(),
                tree_count: model.regressor.tree_count(),
            },
        }
    }

    /// Vocabulary bound to the current model, if any.
    pub fn vocabulary(&self) -> Option<SkillVocabulary> {
        match &*self.state.read() {
            EngineState::NoModel => None,
            EngineState::Loaded(model) => Some(model.vocabulary.clone()),
        }
    }

    /// Drop the current model and return to heuristic scoring.
    pub fn reset(&self) {
        *self.state.write() = EngineState::NoModel;
    }
}
