use crate::cli::ServeArgs;
use crate::infra::{build_service, load_roster, AppState};
use crate::routes::with_fit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use workforce_fit::config::AppConfig;
use workforce_fit::error::AppError;
use workforce_fit::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let roster = load_roster(args.roster_dir.as_deref())?;
    let fit_service = Arc::new(build_service(roster, config.engine.clone()));
    let engine_status = fit_service.engine().status();

    let app = with_fit_routes(fit_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        model_loaded = engine_status.model_loaded,
        "workforce fit service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
