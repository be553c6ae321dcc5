use crate::commands::render_recommendations;
use crate::infra::{build_service, DEMO_SEED, DEMO_WORKERS};
use clap::Args;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use workforce_fit::config::EngineConfig;
use workforce_fit::error::AppError;
use workforce_fit::fit::{
    skill_match, AssignmentRecord, RoleFeatures, RoleId, RoleRecord, TrainingMode,
    WorkerFeatures, WorkerId, WorkerRecord,
};
use workforce_fit::workforce::{FitServiceError, Roster, WorkforceRepository};

const FIRST_NAMES: [&str; 12] = [
    "Ana", "Ben", "Chen", "Dara", "Eli", "Fatima", "Gus", "Hana", "Ivan", "Jo", "Kofi", "Lena",
];
const LAST_NAMES: [&str; 8] = [
    "Ruiz", "Okafor", "Park", "Novak", "Singh", "Moreau", "Holt", "Tanaka",
];

const ROLE_CATALOG: [(&str, &[&str], f64); 6] = [
    (
        "CNC Machine Operator",
        &["CNC Operation", "Blueprint Reading", "Quality Control"],
        0.75,
    ),
    (
        "Welding Specialist",
        &["Welding", "Safety Protocols", "Blueprint Reading"],
        0.80,
    ),
    (
        "Quality Inspector",
        &["Quality Inspection", "Testing", "Documentation"],
        0.65,
    ),
    (
        "Assembly Line Worker",
        &["Manual Assembly", "Power Tools", "Team Work"],
        0.50,
    ),
    (
        "Maintenance Technician",
        &["Machine Maintenance", "Troubleshooting", "Safety"],
        0.85,
    ),
    (
        "Electrical Technician",
        &["Electrical Wiring", "Testing", "Troubleshooting"],
        0.70,
    ),
];

const ASSIGNMENTS_PER_WORKER: usize = 3;
const UNLABELED_SHARE: f64 = 0.1;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Seed for the synthetic roster
    #[arg(long, default_value_t = DEMO_SEED)]
    pub(crate) seed: u64,
    /// Number of synthetic workers
    #[arg(long, default_value_t = DEMO_WORKERS)]
    pub(crate) workers: usize,
    /// Role to rank during the walkthrough
    #[arg(long, default_value_t = 2)]
    pub(crate) role_id: u64,
}

/// Seeded synthetic factory roster with outcomes driven by skill coverage, rest, and performance.
pub(crate) fn demo_roster(seed: u64, worker_count: usize) -> Roster {
    let mut rng = StdRng::seed_from_u64(seed);

    let roles: Vec<RoleRecord> = ROLE_CATALOG
        .iter()
        .enumerate()
        .map(|(index, (name, skills, difficulty))| RoleRecord {
            id: RoleId(index as u64 + 1),
            name: name.to_string(),
            required_skills: skills.iter().map(|skill| skill.to_string()).collect(),
            difficulty_level: Some(*difficulty),
        })
        .collect();

    let mut skill_pool: Vec<&str> = ROLE_CATALOG
        .iter()
        .flat_map(|(_, skills, _)| skills.iter().copied())
        .collect();
    skill_pool.sort_unstable();
    skill_pool.dedup();

    let workers: Vec<WorkerRecord> = (0..worker_count)
        .map(|index| {
            let first = FIRST_NAMES[index % FIRST_NAMES.len()];
            let last = LAST_NAMES[(index / FIRST_NAMES.len() + index) % LAST_NAMES.len()];
            let mut skills = skill_pool.clone();
            skills.shuffle(&mut rng);
            skills.truncate(rng.random_range(2..=5));

            WorkerRecord {
                id: WorkerId(index as u64 + 1),
                name: format!("{first} {last}"),
                age: Some(rng.random_range(21..=60)),
                experience: Some(round_to(rng.random_range(0.0..15.0), 0.5)),
                skills: skills.into_iter().map(str::to_string).collect(),
                fatigue_level: Some(round_to(rng.random_range(0.05..0.9), 0.01)),
                performance_score: Some(round_to(rng.random_range(0.3..1.0), 0.01)),
                hours_per_week: Some(f64::from(rng.random_range(32u32..=55))),
            }
        })
        .collect();

    let mut assignments = Vec::new();
    for worker in &workers {
        let features = WorkerFeatures::from(worker);
        let mut picks: Vec<&RoleRecord> = roles.iter().collect();
        picks.shuffle(&mut rng);
        for role in picks.into_iter().take(ASSIGNMENTS_PER_WORKER) {
            let coverage = skill_match(&features, &RoleFeatures::from(role)).ratio;
            let likelihood = 0.1
                + 0.55 * coverage
                + 0.2 * (1.0 - features.fatigue_level)
                + 0.15 * features.performance_score;
            let success = if rng.random_bool(UNLABELED_SHARE) {
                None
            } else {
                Some(rng.random_bool(likelihood.clamp(0.0, 1.0)))
            };
            assignments.push(AssignmentRecord {
                worker_id: worker.id,
                role_id: role.id,
                success,
            });
        }
    }

    Roster::new(workers, roles, assignments)
}

fn round_to(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        seed,
        workers,
        role_id,
    } = args;

    let roster = demo_roster(seed, workers);
    let labeled = roster
        .labeled_assignments()
        .map_err(FitServiceError::from)?
        .len();
    println!("Workforce fit demo (seed {seed})");
    println!(
        "- {} workers | {} roles | {} assignments ({} with outcomes)",
        roster.workers.len(),
        roster.roles.len(),
        roster.assignments.len(),
        labeled
    );

    let settings = EngineConfig {
        model_path: std::env::temp_dir().join(format!("workforce-fit-demo-{seed}.json")),
        ..EngineConfig::default()
    };
    let service = build_service(roster, settings);
    service.engine().reset();

    println!("\nCold start (heuristic scoring)");
    let cold = service.recommend(RoleId(role_id), None)?;
    render_recommendations(&cold);

    println!("\nTraining");
    let outcome = service.train(TrainingMode::Full)?;
    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Training report unavailable: {err}"),
    }

    println!("\nTrained model");
    let warm = service.recommend(RoleId(role_id), None)?;
    render_recommendations(&warm);

    println!("\nSkill gaps");
    let gaps = service.skill_gap()?;
    for demand in gaps.most_demanded_skills.iter().take(5) {
        println!("  - {} required by {} roles", demand.skill, demand.demand);
    }
    for entry in gaps.workers_needing_training.iter().take(5) {
        println!(
            "  - {:?}: {} -> {}",
            entry.priority,
            entry.worker_name,
            entry.recommended_skills.join(", ")
        );
    }

    Ok(())
}
