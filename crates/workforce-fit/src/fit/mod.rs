//! Fit-prediction engine: feature extraction, gradient-boosted training, prediction with a
//! heuristic fallback, confidence scoring, and model persistence.

pub mod artifact;
pub mod boosting;
pub(crate) mod confidence;
pub mod dataset;
pub mod domain;
mod engine;
pub mod features;
pub mod heuristic;
pub mod policy;
pub mod trainer;

#[cfg(test)]
mod tests;

pub use artifact::{ArtifactError, ModelArtifact, ARTIFACT_FORMAT_VERSION};
pub use dataset::{prepare_training_data, TrainingSet};
pub use domain::{
    AssignmentRecord, RoleFeatures, RoleId, RoleRecord, WorkerFeatures, WorkerId, WorkerRecord,
};
pub use engine::{EngineState, EngineStatus, FitEngine, FitPrediction, PredictionSource, TrainedModel};
pub use features::{extract_features, skill_match, FeatureVector, SkillMatch, SkillVocabulary};
pub use heuristic::HeuristicScorer;
pub use policy::{ConfidencePolicy, FitPolicy, HeuristicWeights};
pub use trainer::{TrainError, TrainerSettings, TrainingMode, TrainingReport};
