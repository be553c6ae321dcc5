use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::domain::{RoleFeatures, WorkerFeatures, WorkerRecord};

/// Number of scalar features that precede the one-hot skill block.
pub const BASE_FEATURE_COUNT: usize = 7;

/// Ordered, bounded set of skill labels backing the one-hot encoding.
///
/// Positions are only meaningful relative to the vocabulary a model was trained with, so a
/// vocabulary is built once per training round and then travels with the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillVocabulary {
    labels: Vec<String>,
}

impl SkillVocabulary {
    /// Rank skills by how many workers hold them (ties by label) and keep the top `cap`.
    pub fn build(workers: &[WorkerRecord], cap: usize) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for worker in workers {
            let distinct: BTreeSet<&str> = worker
                .skills
                .iter()
                .map(|skill| skill.trim())
                .filter(|skill| !skill.is_empty())
                .collect();
            for skill in distinct {
                *counts.entry(skill).or_default() += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|(a_label, a_count), (b_label, b_count)| {
            b_count.cmp(a_count).then_with(|| a_label.cmp(b_label))
        });

        Self {
            labels: ranked
                .into_iter()
                .take(cap)
                .map(|(label, _)| label.to_string())
                .collect(),
        }
    }

    /// Rebuild a vocabulary from persisted labels, preserving their order.
    pub fn from_labels(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Length of every feature vector encoded against this vocabulary.
    pub fn feature_len(&self) -> usize {
        BASE_FEATURE_COUNT + self.labels.len()
    }
}

/// Numeric encoding of one worker-role pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(pub Vec<f64>);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Overlap between a worker's skills and a role's requirements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillMatch {
    pub count: usize,
    /// Fraction of required skills covered, 0 when the role requires nothing.
    pub ratio: f64,
}

pub fn skill_match(worker: &WorkerFeatures, role: &RoleFeatures) -> SkillMatch {
    let count = worker.skills.intersection(&role.required_skills).count();
    let ratio = if role.required_skills.is_empty() {
        0.0
    } else {
        count as f64 / role.required_skills.len() as f64
    };
    SkillMatch { count, ratio }
}

/// Encode a worker-role pair as
/// `[experience, fatigue, performance, age/100, difficulty, match count, match ratio, one-hot...]`.
///
/// Skills outside the vocabulary are ignored, so the length is always `vocabulary.feature_len()`.
pub fn extract_features(
    worker: &WorkerFeatures,
    role: &RoleFeatures,
    vocabulary: &SkillVocabulary,
) -> FeatureVector {
    let matched = skill_match(worker, role);

    let mut values = Vec::with_capacity(vocabulary.feature_len());
    values.push(worker.experience);
    values.push(worker.fatigue_level);
    values.push(worker.performance_score);
    values.push(f64::from(worker.age) / 100.0);
    values.push(role.difficulty_level);
    values.push(matched.count as f64);
    values.push(matched.ratio);

    values.extend(vocabulary.labels().iter().map(|label| {
        if worker.skills.contains(label) {
            1.0
        } else {
            0.0
        }
    }));

    FeatureVector(values)
}
