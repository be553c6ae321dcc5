use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::repository::{RepositoryError, WorkforceRepository};
use super::service::{FitService, FitServiceError, RecommendationRequest};
use crate::fit::TrainingMode;

/// Router builder exposing recommendation, training, status, and analytics endpoints.
pub fn fit_router<R>(service: Arc<FitService<R>>) -> Router
where
    R: WorkforceRepository + 'static,
{
    Router::new()
        .route("/api/v1/fit/recommendations", post(recommend_handler::<R>))
        .route("/api/v1/fit/train", post(train_handler::<R>))
        .route("/api/v1/fit/status", get(status_handler::<R>))
        .route("/api/v1/analytics/skill-gap", get(skill_gap_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrainParams {
    #[serde(default = "default_incremental")]
    incremental: bool,
}

fn default_incremental() -> bool {
    true
}

pub(crate) async fn recommend_handler<R>(
    State(service): State<Arc<FitService<R>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    R: WorkforceRepository + 'static,
{
    match service.recommend(request.role_id, request.top_n) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn train_handler<R>(
    State(service): State<Arc<FitService<R>>>,
    Query(params): Query<TrainParams>,
) -> Response
where
    R: WorkforceRepository + 'static,
{
    let mode = TrainingMode::from_incremental_flag(params.incremental);
    let result = tokio::task::spawn_blocking(move || service.train(mode)).await;

    match result {
        Ok(Ok(outcome)) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Ok(Err(err)) => error_response(err),
        Err(join) => {
            error!(error = %join, "training task aborted");
            let payload = json!({
                "error": "training task aborted",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R>(State(service): State<Arc<FitService<R>>>) -> Response
where
    R: WorkforceRepository + 'static,
{
    match service.status() {
        Ok(status) => (StatusCode::OK, axum::Json(status)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn skill_gap_handler<R>(State(service): State<Arc<FitService<R>>>) -> Response
where
    R: WorkforceRepository + 'static,
{
    match service.skill_gap() {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn status_code(err: &FitServiceError) -> StatusCode {
    match err {
        FitServiceError::RoleNotFound(_)
        | FitServiceError::NoWorkers
        | FitServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        FitServiceError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        FitServiceError::Repository(_)
        | FitServiceError::Training(_)
        | FitServiceError::Artifact(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn error_response(err: FitServiceError) -> Response {
    let status = status_code(&err);
    let payload = match &err {
        FitServiceError::InsufficientData { required, found } => json!({
            "error": err.to_string(),
            "required": required,
            "found": found,
        }),
        _ => json!({
            "error": err.to_string(),
        }),
    };
    if status.is_server_error() {
        error!(error = %err, "fit request failed");
    }
    (status, axum::Json(payload)).into_response()
}
