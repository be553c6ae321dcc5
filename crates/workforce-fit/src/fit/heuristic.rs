use super::domain::{RoleFeatures, WorkerFeatures};
use super::features::skill_match;
use super::policy::HeuristicWeights;

/// Fixed-formula scorer used whenever no trained model is bound.
pub struct HeuristicScorer {
    weights: HeuristicWeights,
}

impl HeuristicScorer {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Weighted blend of skill coverage, performance, rest, and capped experience.
    pub fn score(&self, worker: &WorkerFeatures, role: &RoleFeatures) -> f64 {
        let weights = &self.weights;
        let coverage = skill_match(worker, role).ratio;
        let rest = 1.0 - worker.fatigue_level;
        let seasoning = if weights.experience_saturation_years > 0.0 {
            (worker.experience / weights.experience_saturation_years).min(1.0)
        } else {
            1.0
        };

        coverage * weights.skill_match
            + worker.performance_score * weights.performance
            + rest * weights.rest
            + seasoning * weights.experience
    }

    pub fn confidence(&self) -> f64 {
        self.weights.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn skills(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn experience_term_saturates_at_ten_years() {
        let scorer = HeuristicScorer::new(HeuristicWeights::default());
        let role = RoleFeatures {
            required_skills: BTreeSet::new(),
            difficulty_level: 0.5,
        };
        let mut worker = WorkerFeatures {
            experience: 10.0,
            fatigue_level: 0.0,
            performance_score: 0.0,
            age: 30,
            skills: BTreeSet::new(),
        };
        let at_cap = scorer.score(&worker, &role);
        worker.experience = 35.0;
        let beyond_cap = scorer.score(&worker, &role);

        assert!((at_cap - 0.3).abs() < 1e-12);
        assert_eq!(at_cap, beyond_cap);
    }

    #[test]
    fn perfect_candidate_scores_one() {
        let scorer = HeuristicScorer::new(HeuristicWeights::default());
        let role = RoleFeatures {
            required_skills: skills(&["A", "B"]),
            difficulty_level: 0.9,
        };
        let worker = WorkerFeatures {
            experience: 12.0,
            fatigue_level: 0.0,
            performance_score: 1.0,
            age: 40,
            skills: skills(&["A", "B", "C"]),
        };

        assert!((scorer.score(&worker, &role) - 1.0).abs() < 1e-12);
        assert_eq!(scorer.confidence(), 0.7);
    }

    #[test]
    fn fractional_skill_match_uses_documented_weights() {
        let scorer = HeuristicScorer::new(HeuristicWeights::default());
        let worker = WorkerFeatures {
            experience: 5.0,
            fatigue_level: 0.2,
            performance_score: 0.8,
            age: 30,
            skills: skills(&["A", "B"]),
        };
        let role = RoleFeatures {
            required_skills: skills(&["A", "B", "C"]),
            difficulty_level: 0.6,
        };

        let expected = 0.4 * (2.0 / 3.0) + 0.3 * 0.8 + 0.2 * 0.8 + 0.1 * 0.5;
        assert!((scorer.score(&worker, &role) - expected).abs() < 1e-12);
        assert!((scorer.score(&worker, &role) - 0.7167).abs() < 1e-4);
    }

    #[test]
    fn score_stays_within_unit_interval_for_in_range_inputs() {
        let scorer = HeuristicScorer::new(HeuristicWeights::default());
        let steps = [0.0, 0.25, 0.5, 0.75, 1.0];
        let role = RoleFeatures {
            required_skills: skills(&["A", "B", "C"]),
            difficulty_level: 0.5,
        };
        let skill_sets: [&[&str]; 4] = [&[], &["A"], &["A", "B"], &["A", "B", "C", "D"]];

        for experience in [0.0, 2.5, 10.0, 40.0] {
            for &fatigue_level in &steps {
                for &performance_score in &steps {
                    for held in skill_sets {
                        let worker = WorkerFeatures {
                            experience,
                            fatigue_level,
                            performance_score,
                            age: 30,
                            skills: skills(held),
                        };
                        let score = scorer.score(&worker, &role);
                        assert!(
                            (0.0..=1.0).contains(&score),
                            "score {score} out of range for {worker:?}"
                        );
                    }
                }
            }
        }
    }
}
