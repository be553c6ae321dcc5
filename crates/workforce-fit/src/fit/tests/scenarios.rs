use super::common::*;
use crate::fit::domain::{AssignmentRecord, RoleId, WorkerId};
use crate::fit::{FitEngine, PredictionSource, TrainingMode, TrainingReport};

fn assignment(worker: u64, role: u64, success: bool) -> AssignmentRecord {
    AssignmentRecord {
        worker_id: WorkerId(worker),
        role_id: RoleId(role),
        success: Some(success),
    }
}

#[test]
fn engine_trains_on_tiny_history_when_called_directly() {
    let engine = FitEngine::default();
    let workers = vec![
        worker_record(1, &["Welding"]),
        worker_record(2, &["Hydraulics"]),
        worker_record(3, &["Welding", "Hydraulics"]),
    ];
    let roles = vec![role_record(1, &["Welding"], 0.5)];
    let assignments = vec![
        assignment(1, 1, true),
        assignment(2, 1, false),
        assignment(3, 1, true),
    ];

    let data = engine.prepare_training_data(&assignments, &workers, &roles);
    let report = engine.train(&data, TrainingMode::Full).expect("training");

    assert!(matches!(
        report,
        TrainingReport::Full {
            mse: Some(_),
            r2: Some(_),
            train_sample_count: 2,
            test_sample_count: 1,
        }
    ));
    assert!(engine.status().model_loaded);
}

#[test]
fn single_sample_history_has_no_hold_out_metrics() {
    let engine = FitEngine::default();
    let workers = vec![worker_record(1, &["Welding"])];
    let roles = vec![role_record(1, &["Welding"], 0.5)];

    let data = engine.prepare_training_data(&[assignment(1, 1, true)], &workers, &roles);
    let report = engine.train(&data, TrainingMode::Full).expect("training");

    assert_eq!(
        report,
        TrainingReport::Full {
            mse: None,
            r2: None,
            train_sample_count: 1,
            test_sample_count: 0,
        }
    );
}

#[test]
fn heuristic_and_model_agree_on_ordering_for_clear_cases() {
    let history = history();
    let engine = FitEngine::default();
    let candidate_role = role(&["First Aid", "Team Leadership"], 0.4);
    let rested_expert = worker(9.0, 0.1, 0.9, &["First Aid", "Team Leadership"]);
    let tired_novice = worker(0.0, 0.9, 0.1, &["Welding"]);

    let before = (
        engine.predict(&rested_expert, &candidate_role),
        engine.predict(&tired_novice, &candidate_role),
    );
    let data = engine.prepare_training_data(&history.assignments, &history.workers, &history.roles);
    engine.train(&data, TrainingMode::Full).expect("training");
    let after = (
        engine.predict(&rested_expert, &candidate_role),
        engine.predict(&tired_novice, &candidate_role),
    );

    assert_eq!(before.0.source, PredictionSource::Heuristic);
    assert_eq!(after.0.source, PredictionSource::Model);
    assert!(before.0.fit_score > before.1.fit_score);
    assert!(after.0.fit_score > after.1.fit_score);
}
