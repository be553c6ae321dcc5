use crate::infra::build_service;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use workforce_fit::config::AppConfig;
use workforce_fit::error::AppError;
use workforce_fit::fit::{RoleId, TrainingMode, TrainingReport};
use workforce_fit::telemetry;
use workforce_fit::workforce::{FitService, RecommendationResponse, Roster};

#[derive(Args, Debug)]
pub(crate) struct RosterArgs {
    /// Directory holding workers.csv, roles.csv, and assignments.csv
    #[arg(long)]
    pub(crate) roster_dir: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct TrainArgs {
    #[command(flatten)]
    pub(crate) roster: RosterArgs,
    /// Retrain from scratch instead of warm-starting the saved model
    #[arg(long)]
    pub(crate) full: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    #[command(flatten)]
    pub(crate) roster: RosterArgs,
    /// Role to rank workers for
    #[arg(long)]
    pub(crate) role_id: u64,
    /// Number of workers to return (1-10, defaults to APP_DEFAULT_TOP_N)
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
}

fn service_for(args: &RosterArgs) -> Result<FitService<Roster>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let roster = Roster::from_dir(&args.roster_dir)?;
    Ok(build_service(roster, config.engine))
}

pub(crate) async fn run_train(args: TrainArgs) -> Result<(), AppError> {
    let service = Arc::new(service_for(&args.roster)?);
    let mode = TrainingMode::from_incremental_flag(!args.full);

    let worker = service.clone();
    let outcome = tokio::task::spawn_blocking(move || worker.train(mode))
        .await
        .map_err(|err| AppError::Io(std::io::Error::other(err)))??;

    println!(
        "Trained on {} samples -> {}",
        outcome.training_samples,
        service.settings().model_path.display()
    );
    match outcome.report {
        TrainingReport::Full {
            mse,
            r2,
            train_sample_count,
            test_sample_count,
        } => {
            println!("- mode: full ({train_sample_count} train / {test_sample_count} held out)");
            match (mse, r2) {
                (Some(mse), Some(r2)) => println!("- hold-out mse {mse:.4} | r2 {r2:.4}"),
                _ => println!("- hold-out metrics unavailable (dataset too small)"),
            }
        }
        TrainingReport::Incremental { new_sample_count } => {
            println!("- mode: incremental ({new_sample_count} samples appended)");
        }
    }
    Ok(())
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let service = service_for(&args.roster)?;
    let response = service.recommend(RoleId(args.role_id), args.top_n)?;
    render_recommendations(&response);
    Ok(())
}

pub(crate) fn run_status(args: RosterArgs) -> Result<(), AppError> {
    let service = service_for(&args)?;
    let status = service.status()?;
    match serde_json::to_string_pretty(&status) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Status unavailable: {err}"),
    }
    Ok(())
}

pub(crate) fn render_recommendations(response: &RecommendationResponse) {
    println!(
        "Top {} candidates for {} (role {})",
        response.recommendations.len(),
        response.role_name,
        response.role_id
    );
    for (rank, entry) in response.recommendations.iter().enumerate() {
        println!(
            "  {}. {} (#{}) fit {:.2} | confidence {:.2} | skill match {:.0}% | fatigue {:.2} | {:?}",
            rank + 1,
            entry.worker_name,
            entry.worker_id,
            entry.fit_score,
            entry.confidence,
            entry.skill_match_percentage,
            entry.fatigue_level,
            entry.source
        );
    }
}
