use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::fit::domain::{RoleRecord, WorkerFeatures, WorkerId, WorkerRecord};

const RECOMMENDED_SKILLS_PER_WORKER: usize = 3;
const HIGH_PRIORITY_PERFORMANCE: f64 = 0.7;
const HIGH_PRIORITY_MAX_WEEKLY_HOURS: f64 = 48.0;
const MEDIUM_PRIORITY_PERFORMANCE: f64 = 0.5;

/// Ordering is significant: higher priorities sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TrainingPriority {
    High,
    Medium,
    Low,
}

impl TrainingPriority {
    pub fn reason(self) -> &'static str {
        match self {
            TrainingPriority::High => "High performer with capacity for growth",
            TrainingPriority::Medium => "Good potential for skill development",
            TrainingPriority::Low => "Focus on current role mastery first",
        }
    }

    fn assess(performance_score: f64, hours_per_week: Option<f64>) -> Self {
        let has_capacity = hours_per_week
            .map(|hours| hours < HIGH_PRIORITY_MAX_WEEKLY_HOURS)
            .unwrap_or(true);
        if performance_score > HIGH_PRIORITY_PERFORMANCE && has_capacity {
            TrainingPriority::High
        } else if performance_score > MEDIUM_PRIORITY_PERFORMANCE {
            TrainingPriority::Medium
        } else {
            TrainingPriority::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRecommendation {
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub current_skills: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub reason: &'static str,
    pub priority: TrainingPriority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillDemand {
    pub skill: String,
    pub demand: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGapReport {
    pub workers_needing_training: Vec<SkillRecommendation>,
    pub most_demanded_skills: Vec<SkillDemand>,
}

/// Compare each worker's skills against everything the roles require.
///
/// Demand counts how many roles require a skill. Workers missing at least one demanded skill get
/// the most-demanded gaps recommended, grouped by priority with roster order kept inside a group.
pub fn skill_gap(workers: &[WorkerRecord], roles: &[RoleRecord]) -> SkillGapReport {
    let mut demand: BTreeMap<String, usize> = BTreeMap::new();
    for role in roles {
        let required: BTreeSet<&str> = role
            .required_skills
            .iter()
            .map(|skill| skill.trim())
            .filter(|skill| !skill.is_empty())
            .collect();
        for skill in required {
            *demand.entry(skill.to_string()).or_default() += 1;
        }
    }

    let mut workers_needing_training: Vec<SkillRecommendation> = workers
        .iter()
        .filter_map(|worker| {
            let features = WorkerFeatures::from(worker);
            let mut missing: Vec<(&String, usize)> = demand
                .iter()
                .filter(|(skill, _)| !features.skills.contains(skill.as_str()))
                .map(|(skill, count)| (skill, *count))
                .collect();
            if missing.is_empty() {
                return None;
            }
            missing.sort_by(|left, right| {
                right.1.cmp(&left.1).then_with(|| left.0.cmp(right.0))
            });

            let priority =
                TrainingPriority::assess(features.performance_score, worker.hours_per_week);
            Some(SkillRecommendation {
                worker_id: worker.id,
                worker_name: worker.name.clone(),
                current_skills: features.skills.into_iter().collect(),
                recommended_skills: missing
                    .into_iter()
                    .take(RECOMMENDED_SKILLS_PER_WORKER)
                    .map(|(skill, _)| skill.clone())
                    .collect(),
                reason: priority.reason(),
                priority,
            })
        })
        .collect();
    workers_needing_training.sort_by_key(|recommendation| recommendation.priority);

    let mut most_demanded_skills: Vec<SkillDemand> = demand
        .into_iter()
        .map(|(skill, demand)| SkillDemand { skill, demand })
        .collect();
    most_demanded_skills.sort_by_key(|entry| Reverse(entry.demand));

    SkillGapReport {
        workers_needing_training,
        most_demanded_skills,
    }
}
