use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use benefits_screener::error::AppError;
use benefits_screener::results::{
    results_router, screen_programs, FilterRequest, FilteredResults, FormData, Program,
    ScreenRepository, ScreeningService,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// One-shot filtering payload: the data and the selection in a single request.
#[derive(Debug, Deserialize)]
pub(crate) struct ScreenRequest {
    #[serde(default)]
    pub(crate) form_data: FormData,
    pub(crate) programs: Vec<Program>,
    #[serde(flatten)]
    pub(crate) filter: FilterRequest,
}

pub(crate) fn with_results_routes<R>(service: Arc<ScreeningService<R>>) -> axum::Router
where
    R: ScreenRepository + 'static,
{
    results_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/screen", axum::routing::post(screen_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn screen_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScreenRequest>,
) -> Result<Json<FilteredResults>, AppError> {
    let ScreenRequest {
        form_data,
        programs,
        filter,
    } = payload;

    let results = screen_programs(
        &form_data,
        &programs,
        &filter,
        state.screening.reference_month(),
    )?;
    Ok(Json(results))
}
