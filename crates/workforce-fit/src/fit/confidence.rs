use super::domain::{RoleFeatures, WorkerFeatures};
use super::features::skill_match;
use super::policy::ConfidencePolicy;

/// Trust signal for a model prediction, derived from input quality rather than the raw score.
pub fn estimate(policy: &ConfidencePolicy, worker: &WorkerFeatures, role: &RoleFeatures) -> f64 {
    let mut confidence = policy.baseline;

    if worker.fatigue_level > policy.fatigue_threshold {
        confidence -= policy.fatigue_penalty;
    }

    if worker.experience < policy.minimum_experience_years {
        confidence -= policy.inexperience_penalty;
    }

    if skill_match(worker, role).ratio > policy.skill_match_threshold {
        confidence += policy.skill_match_bonus;
    }

    confidence.max(policy.floor).min(policy.ceiling)
}
