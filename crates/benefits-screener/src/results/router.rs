use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{FormData, Program};
use super::repository::{RepositoryError, ScreenId, ScreenRepository};
use super::service::{FilterRequest, ScreeningService, ScreeningServiceError};

/// Payload carrying the raw eligibility results for a screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreResultsRequest {
    #[serde(default)]
    pub form_data: FormData,
    pub programs: Vec<Program>,
}

/// Router builder exposing HTTP endpoints for storing and filtering results.
pub fn results_router<R>(service: Arc<ScreeningService<R>>) -> Router
where
    R: ScreenRepository + 'static,
{
    Router::new()
        .route("/api/v1/screens/:screen_id/results", put(store_handler::<R>))
        .route(
            "/api/v1/screens/:screen_id/results/filter",
            post(filter_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn store_handler<R>(
    State(service): State<Arc<ScreeningService<R>>>,
    Path(screen_id): Path<String>,
    axum::Json(request): axum::Json<StoreResultsRequest>,
) -> Response
where
    R: ScreenRepository + 'static,
{
    match service.store_results(ScreenId(screen_id), request.form_data, request.programs) {
        Ok(record) => {
            let payload = json!({
                "screen_id": record.screen_id,
                "program_count": record.programs.len(),
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn filter_handler<R>(
    State(service): State<Arc<ScreeningService<R>>>,
    Path(screen_id): Path<String>,
    axum::Json(request): axum::Json<FilterRequest>,
) -> Response
where
    R: ScreenRepository + 'static,
{
    match service.filter(&ScreenId(screen_id), &request) {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ScreeningServiceError) -> Response {
    let status = match &error {
        ScreeningServiceError::Catalog(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScreeningServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ScreeningServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
