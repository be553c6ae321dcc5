use crate::fit::domain::{
    AssignmentRecord, RoleFeatures, RoleId, RoleRecord, WorkerFeatures, WorkerId, WorkerRecord,
};

pub(super) const SKILLS: [&str; 8] = [
    "Welding",
    "CNC Operation",
    "Quality Inspection",
    "Blueprint Reading",
    "Hydraulics",
    "First Aid",
    "Team Leadership",
    "Calibration",
];

pub(super) fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn worker_record(id: u64, skills: &[&str]) -> WorkerRecord {
    WorkerRecord {
        id: WorkerId(id),
        name: format!("worker-{id}"),
        age: Some(30),
        experience: Some(4.0),
        skills: labels(skills),
        fatigue_level: Some(0.3),
        performance_score: Some(0.7),
        hours_per_week: Some(40.0),
    }
}

pub(super) fn role_record(id: u64, required: &[&str], difficulty: f64) -> RoleRecord {
    RoleRecord {
        id: RoleId(id),
        name: format!("role-{id}"),
        required_skills: labels(required),
        difficulty_level: Some(difficulty),
    }
}

pub(super) fn worker(
    experience: f64,
    fatigue_level: f64,
    performance_score: f64,
    skills: &[&str],
) -> WorkerFeatures {
    WorkerFeatures {
        experience,
        fatigue_level,
        performance_score,
        age: 30,
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
    }
}

pub(super) fn role(required: &[&str], difficulty_level: f64) -> RoleFeatures {
    RoleFeatures {
        required_skills: required.iter().map(|skill| skill.to_string()).collect(),
        difficulty_level,
    }
}

/// Deterministic workforce where success tracks skill coverage and rest.
pub(super) struct History {
    pub(super) workers: Vec<WorkerRecord>,
    pub(super) roles: Vec<RoleRecord>,
    pub(super) assignments: Vec<AssignmentRecord>,
}

pub(super) fn history() -> History {
    let workers: Vec<WorkerRecord> = (0..24u64)
        .map(|id| {
            let skills: Vec<&str> = SKILLS
                .iter()
                .enumerate()
                .filter(|(index, _)| (id as usize + index) % 3 != 0)
                .map(|(_, skill)| *skill)
                .collect();
            WorkerRecord {
                id: WorkerId(id),
                name: format!("worker-{id}"),
                age: Some(22 + (id as u32 * 3) % 30),
                experience: Some((id % 12) as f64),
                skills: labels(&skills),
                fatigue_level: Some(((id * 7) % 10) as f64 / 10.0),
                performance_score: Some(((id * 3) % 10) as f64 / 10.0),
                hours_per_week: Some(38.0 + (id % 10) as f64),
            }
        })
        .collect();

    let roles = vec![
        role_record(1, &["Welding", "Blueprint Reading"], 0.6),
        role_record(2, &["CNC Operation", "Calibration", "Quality Inspection"], 0.8),
        role_record(3, &["First Aid", "Team Leadership"], 0.4),
    ];

    let mut assignments = Vec::new();
    for worker in &workers {
        for role in &roles {
            let features = WorkerFeatures::from(worker);
            let required = RoleFeatures::from(role);
            let coverage = crate::fit::features::skill_match(&features, &required).ratio;
            let success = coverage >= 0.5 && features.fatigue_level < 0.6;
            assignments.push(AssignmentRecord {
                worker_id: worker.id,
                role_id: role.id,
                success: Some(success),
            });
        }
    }

    History {
        workers,
        roles,
        assignments,
    }
}
