use serde::{Deserialize, Serialize};

/// Maximum number of skills tracked by the one-hot encoding.
pub const DEFAULT_VOCABULARY_CAP: usize = 20;

/// Policy constants shared by feature extraction, the heuristic fallback, and confidence scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitPolicy {
    pub vocabulary_cap: usize,
    pub heuristic: HeuristicWeights,
    pub confidence: ConfidencePolicy,
}

impl Default for FitPolicy {
    fn default() -> Self {
        Self {
            vocabulary_cap: DEFAULT_VOCABULARY_CAP,
            heuristic: HeuristicWeights::default(),
            confidence: ConfidencePolicy::default(),
        }
    }
}

/// Fixed weights of the no-model scoring formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    pub skill_match: f64,
    pub performance: f64,
    pub rest: f64,
    pub experience: f64,
    /// Years of experience at which the experience term saturates.
    pub experience_saturation_years: f64,
    pub confidence: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            skill_match: 0.4,
            performance: 0.3,
            rest: 0.2,
            experience: 0.1,
            experience_saturation_years: 10.0,
            confidence: 0.7,
        }
    }
}

/// Data-quality adjustments applied to model predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidencePolicy {
    pub baseline: f64,
    pub fatigue_threshold: f64,
    pub fatigue_penalty: f64,
    pub minimum_experience_years: f64,
    pub inexperience_penalty: f64,
    pub skill_match_threshold: f64,
    pub skill_match_bonus: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            baseline: 0.8,
            fatigue_threshold: 0.7,
            fatigue_penalty: 0.1,
            minimum_experience_years: 1.0,
            inexperience_penalty: 0.1,
            skill_match_threshold: 0.8,
            skill_match_bonus: 0.1,
            floor: 0.5,
            ceiling: 1.0,
        }
    }
}
