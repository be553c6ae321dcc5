use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::analytics::{self, SkillGapReport};
use super::repository::{RepositoryError, WorkforceRepository};
use crate::config::EngineConfig;
use crate::fit::{
    skill_match, ArtifactError, FitEngine, PredictionSource, RoleFeatures, RoleId, TrainError,
    TrainingMode, TrainingReport, WorkerFeatures, WorkerId,
};

pub const MAX_TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub role_id: RoleId,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerRecommendation {
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub fit_score: f64,
    pub confidence: f64,
    pub source: PredictionSource,
    pub skills: Vec<String>,
    pub fatigue_level: f64,
    pub performance_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_per_week: Option<f64>,
    /// Share of the role's required skills the worker holds, on a 0-100 scale.
    pub skill_match_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResponse {
    pub role_id: RoleId,
    pub role_name: String,
    pub recommendations: Vec<WorkerRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingOutcome {
    #[serde(flatten)]
    pub report: TrainingReport,
    pub training_samples: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub model_loaded: bool,
    pub training_sample_count: usize,
    pub can_train: bool,
    pub vocabulary_size: usize,
}

/// Service composing the repository with the shared fit engine.
pub struct FitService<R> {
    repository: Arc<R>,
    engine: Arc<FitEngine>,
    settings: EngineConfig,
    training: Mutex<()>,
}

impl<R> FitService<R>
where
    R: WorkforceRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: Arc<FitEngine>, settings: EngineConfig) -> Self {
        Self {
            repository,
            engine,
            settings,
            training: Mutex::new(()),
        }
    }

    pub fn engine(&self) -> &Arc<FitEngine> {
        &self.engine
    }

    pub fn settings(&self) -> &EngineConfig {
        &self.settings
    }

    /// Rank every worker against a role and keep the best `top_n`.
    pub fn recommend(
        &self,
        role_id: RoleId,
        top_n: Option<usize>,
    ) -> Result<RecommendationResponse, FitServiceError> {
        let top_n = top_n
            .unwrap_or(self.settings.default_top_n)
            .clamp(1, MAX_TOP_N);
        let role = self
            .repository
            .role(role_id)?
            .ok_or(FitServiceError::RoleNotFound(role_id))?;
        let workers = self.repository.workers()?;
        if workers.is_empty() {
            return Err(FitServiceError::NoWorkers);
        }

        let required = RoleFeatures::from(&role);
        let mut recommendations: Vec<WorkerRecommendation> = workers
            .iter()
            .map(|worker| {
                let features = WorkerFeatures::from(worker);
                let prediction = self.engine.predict(&features, &required);
                let matched = skill_match(&features, &required);
                WorkerRecommendation {
                    worker_id: worker.id,
                    worker_name: worker.name.clone(),
                    fit_score: prediction.fit_score,
                    confidence: prediction.confidence,
                    source: prediction.source,
                    fatigue_level: features.fatigue_level,
                    performance_score: features.performance_score,
                    hours_per_week: worker.hours_per_week,
                    skill_match_percentage: matched.ratio * 100.0,
                    skills: features.skills.into_iter().collect(),
                }
            })
            .collect();

        recommendations.sort_by(|left, right| {
            rank_key(right.fit_score)
                .total_cmp(&rank_key(left.fit_score))
                .then_with(|| left.worker_id.cmp(&right.worker_id))
        });
        recommendations.truncate(top_n);

        Ok(RecommendationResponse {
            role_id: role.id,
            role_name: role.name,
            recommendations,
        })
    }

    /// Retrain from the repository's labeled history and persist the result.
    pub fn train(&self, mode: TrainingMode) -> Result<TrainingOutcome, FitServiceError> {
        let _training = self.training.lock();

        let assignments = self.repository.labeled_assignments()?;
        let required = self.settings.min_training_samples;
        if assignments.len() < required {
            return Err(FitServiceError::InsufficientData {
                required,
                found: assignments.len(),
            });
        }

        let workers = self.repository.workers()?;
        let roles = self.repository.roles()?;
        let data = self
            .engine
            .prepare_training_data(&assignments, &workers, &roles);
        info!(
            assignments = assignments.len(),
            samples = data.len(),
            vocabulary = data.vocabulary.len(),
            ?mode,
            "training fit model"
        );

        let report = self.engine.train(&data, mode)?;
        self.engine.save(&self.settings.model_path)?;
        info!(mode = ?report.mode(), "fit model trained and saved");

        Ok(TrainingOutcome {
            report,
            training_samples: data.len(),
        })
    }

    pub fn status(&self) -> Result<ServiceStatus, FitServiceError> {
        let training_sample_count = self.repository.labeled_assignments()?.len();
        let engine = self.engine.status();
        Ok(ServiceStatus {
            model_loaded: engine.model_loaded,
            training_sample_count,
            can_train: training_sample_count >= self.settings.min_training_samples,
            vocabulary_size: engine.vocabulary_size,
        })
    }

    pub fn skill_gap(&self) -> Result<SkillGapReport, FitServiceError> {
        let workers = self.repository.workers()?;
        let roles = self.repository.roles()?;
        Ok(analytics::skill_gap(&workers, &roles))
    }
}

/// Unscorable workers sink to the bottom of the ranking.
fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// Error raised by the fit service.
#[derive(Debug, thiserror::Error)]
pub enum FitServiceError {
    #[error("role {0} not found")]
    RoleNotFound(RoleId),
    #[error("no workers available")]
    NoWorkers,
    #[error("insufficient training data: need at least {required} labeled assignments, found {found}")]
    InsufficientData { required: usize, found: usize },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Training(#[from] TrainError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
