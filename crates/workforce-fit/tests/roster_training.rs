use std::fs;
use std::path::Path;
use std::sync::Arc;

use workforce_fit::config::EngineConfig;
use workforce_fit::fit::{FitEngine, PredictionSource, RoleId, TrainingMode};
use workforce_fit::workforce::{FitService, Roster};

const WORKERS: &str = "\
id,name,age,experience,skills,fatigue_level,performance_score,hours_per_week
1,Ana Ruiz,34,8,Welding;Blueprint Reading;First Aid,0.2,0.9,40
2,Ben Ode,29,3,Welding,0.5,0.7,45
3,Cy Park,41,12,CNC Operation;Quality Inspection,0.1,0.8,38
4,Dee Holt,23,0.5,Forklift,0.8,0.4,50
5,Eli Cruz,37,6,Blueprint Reading;Quality Inspection,0.3,0.6,42
6,Fay Lin,,,,,,
";

const ROLES: &str = "\
id,name,required_skills,difficulty_level
10,Welder,Welding;Blueprint Reading,0.6
11,Inspector,Quality Inspection,0.5
";

const ASSIGNMENTS: &str = "\
worker_id,role_id,success
1,10,true
2,10,false
3,11,true
4,11,false
5,11,true
5,10,false
1,11,false
6,10,
";

fn write_roster(dir: &Path) {
    fs::write(dir.join("workers.csv"), WORKERS).expect("write workers");
    fs::write(dir.join("roles.csv"), ROLES).expect("write roles");
    fs::write(dir.join("assignments.csv"), ASSIGNMENTS).expect("write assignments");
}

fn service(roster: Roster, model_path: &Path) -> FitService<Roster> {
    let engine = Arc::new(FitEngine::default());
    engine.load(model_path);
    FitService::new(
        Arc::new(roster),
        engine,
        EngineConfig {
            model_path: model_path.to_path_buf(),
            ..EngineConfig::default()
        },
    )
}

#[test]
fn roster_directory_trains_and_serves_after_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_roster(dir.path());
    let model_path = dir.path().join("models").join("fit_model.json");

    let roster = Roster::from_dir(dir.path()).expect("roster loads");
    assert_eq!(roster.workers.len(), 6);
    assert_eq!(roster.assignments.len(), 8);

    let first = service(roster.clone(), &model_path);
    let status = first.status().expect("status");
    assert_eq!(status.training_sample_count, 7);
    assert!(status.can_train);
    assert!(!status.model_loaded);

    let outcome = first.train(TrainingMode::Incremental).expect("training");
    assert_eq!(outcome.training_samples, 7);
    assert_eq!(outcome.report.mode(), TrainingMode::Full);

    let restarted = service(roster, &model_path);
    assert!(restarted.status().expect("status").model_loaded);

    let before = first.recommend(RoleId(10), Some(6)).expect("recommend");
    let after = restarted.recommend(RoleId(10), Some(6)).expect("recommend");
    assert_eq!(before, after);
    assert_eq!(after.recommendations.len(), 6);
    assert!(after
        .recommendations
        .iter()
        .all(|entry| entry.source == PredictionSource::Model));
}

#[test]
fn cold_start_recommendations_use_heuristic_ranking() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_roster(dir.path());
    let roster = Roster::from_dir(dir.path()).expect("roster loads");
    let service = service(roster, &dir.path().join("absent.json"));

    let response = service.recommend(RoleId(10), None).expect("recommend");

    assert_eq!(response.role_name, "Welder");
    assert_eq!(response.recommendations[0].worker_name, "Ana Ruiz");
    assert_eq!(response.recommendations[0].skill_match_percentage, 100.0);
    assert_eq!(response.recommendations[0].confidence, 0.7);
}
