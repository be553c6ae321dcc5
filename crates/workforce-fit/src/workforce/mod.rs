//! Workforce recommendation service: ranks workers for a role with the fit engine, gates and
//! persists retraining, and reports skill gaps across the roster.

pub mod analytics;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use analytics::{skill_gap, SkillDemand, SkillGapReport, SkillRecommendation, TrainingPriority};
pub use repository::{RepositoryError, WorkforceRepository};
pub use roster::{Roster, RosterError};
pub use router::fit_router;
pub use service::{
    FitService, FitServiceError, RecommendationRequest, RecommendationResponse, ServiceStatus,
    TrainingOutcome, WorkerRecommendation, MAX_TOP_N,
};
