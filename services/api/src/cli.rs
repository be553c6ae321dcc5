use crate::commands::{run_recommend, run_status, run_train, RecommendArgs, RosterArgs, TrainArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use workforce_fit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Workforce Fit",
    about = "Recommend the best-fit workers for a role and manage the fit model",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Train the fit model from a roster directory and save it
    Train(TrainArgs),
    /// Rank workers for a role
    Recommend(RecommendArgs),
    /// Show model and training-data status for a roster
    Status(RosterArgs),
    /// Generate a synthetic roster and walk through cold start, training, and ranking
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Directory holding workers.csv, roles.csv, and assignments.csv.
    /// Without it the service runs on the seeded demo roster.
    #[arg(long)]
    pub(crate) roster_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Train(args) => run_train(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Status(args) => run_status(args),
        Command::Demo(args) => run_demo(args),
    }
}
