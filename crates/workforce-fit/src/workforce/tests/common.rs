use std::path::PathBuf;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;
use tempfile::TempDir;

use crate::config::EngineConfig;
use crate::fit::domain::{
    AssignmentRecord, RoleId, RoleRecord, WorkerFeatures, WorkerId, WorkerRecord,
};
use crate::fit::{skill_match, FitEngine, RoleFeatures};
use crate::workforce::repository::{RepositoryError, WorkforceRepository};
use crate::workforce::{fit_router, FitService, Roster};

const SKILLS: [&str; 6] = [
    "Welding",
    "CNC Operation",
    "Quality Inspection",
    "Blueprint Reading",
    "Forklift",
    "First Aid",
];

pub(super) fn worker(id: u64, skills: &[&str], performance: f64, fatigue: f64) -> WorkerRecord {
    WorkerRecord {
        id: WorkerId(id),
        name: format!("worker-{id}"),
        age: Some(28 + (id as u32 % 20)),
        experience: Some((id % 9) as f64),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        fatigue_level: Some(fatigue),
        performance_score: Some(performance),
        hours_per_week: Some(40.0 + (id % 12) as f64),
    }
}

pub(super) fn role(id: u64, name: &str, required: &[&str], difficulty: f64) -> RoleRecord {
    RoleRecord {
        id: RoleId(id),
        name: name.to_string(),
        required_skills: required.iter().map(|skill| skill.to_string()).collect(),
        difficulty_level: Some(difficulty),
    }
}

pub(super) fn roles() -> Vec<RoleRecord> {
    vec![
        role(1, "Welder", &["Welding", "Blueprint Reading"], 0.6),
        role(2, "Machinist", &["CNC Operation", "Quality Inspection"], 0.8),
        role(3, "Warehouse Lead", &["Forklift", "First Aid"], 0.4),
    ]
}

/// Twelve workers with rotating skills and an outcome for every worker/role pair.
pub(super) fn roster() -> Roster {
    let workers: Vec<WorkerRecord> = (1..=12u64)
        .map(|id| {
            let skills: Vec<&str> = SKILLS
                .iter()
                .enumerate()
                .filter(|(index, _)| (id as usize + index) % 3 != 0)
                .map(|(_, skill)| *skill)
                .collect();
            let performance = ((id * 3) % 10) as f64 / 10.0;
            let fatigue = ((id * 7) % 10) as f64 / 10.0;
            worker(id, &skills, performance, fatigue)
        })
        .collect();
    let roles = roles();

    let mut assignments = Vec::new();
    for worker in &workers {
        for role in &roles {
            let features = WorkerFeatures::from(worker);
            let coverage = skill_match(&features, &RoleFeatures::from(role)).ratio;
            assignments.push(AssignmentRecord {
                worker_id: worker.id,
                role_id: role.id,
                success: Some(coverage >= 0.5 && features.fatigue_level < 0.6),
            });
        }
    }

    Roster::new(workers, roles, assignments)
}

pub(super) fn settings(dir: &TempDir) -> EngineConfig {
    EngineConfig {
        model_path: model_path(dir),
        ..EngineConfig::default()
    }
}

pub(super) fn model_path(dir: &TempDir) -> PathBuf {
    dir.path().join("models").join("fit_model.json")
}

pub(super) fn build_service<R>(repository: R) -> (FitService<R>, TempDir)
where
    R: WorkforceRepository + 'static,
{
    let dir = tempfile::tempdir().expect("tempdir");
    let service = FitService::new(
        Arc::new(repository),
        Arc::new(FitEngine::default()),
        settings(&dir),
    );
    (service, dir)
}

pub(super) fn router_with_service<R>(service: FitService<R>) -> axum::Router
where
    R: WorkforceRepository + 'static,
{
    fit_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl WorkforceRepository for UnavailableRepository {
    fn workers(&self) -> Result<Vec<WorkerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn role(&self, _id: RoleId) -> Result<Option<RoleRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn roles(&self) -> Result<Vec<RoleRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn assignments(&self) -> Result<Vec<AssignmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
