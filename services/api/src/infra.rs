use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use workforce_fit::config::EngineConfig;
use workforce_fit::error::AppError;
use workforce_fit::fit::FitEngine;
use workforce_fit::workforce::{FitService, Roster};

pub(crate) const DEMO_SEED: u64 = 42;
pub(crate) const DEMO_WORKERS: usize = 40;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load a roster directory, or fall back to the seeded demo roster.
pub(crate) fn load_roster(dir: Option<&Path>) -> Result<Roster, AppError> {
    match dir {
        Some(dir) => Ok(Roster::from_dir(dir)?),
        None => {
            info!(seed = DEMO_SEED, "no roster directory given; using demo roster");
            Ok(crate::demo::demo_roster(DEMO_SEED, DEMO_WORKERS))
        }
    }
}

/// Wire a fit service around one engine, restoring the saved model when present.
pub(crate) fn build_service(roster: Roster, settings: EngineConfig) -> FitService<Roster> {
    let engine = Arc::new(FitEngine::default());
    engine.load(&settings.model_path);
    FitService::new(Arc::new(roster), engine, settings)
}
