use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::repository::{RepositoryError, SubmissionId, SubmissionRepository};
use super::service::{IntakeService, IntakeServiceError, ReceivedSubmission};
use super::submission::SubmissionPayload;

/// Router builder exposing the intake endpoint and its health check.
pub fn intake_router<R>(service: Arc<IntakeService<R>>) -> Router
where
    R: SubmissionRepository + 'static,
{
    Router::new()
        .route("/api/v1/intake", post(submit_handler::<R>))
        .route("/api/v1/intake/health", get(health_handler))
        .route("/api/v1/intake/:submission_id", get(receipt_handler::<R>))
        .with_state(service)
}

fn idempotency_key(headers: &HeaderMap) -> Option<SubmissionId> {
    let raw = headers.get("x-idempotency-key")?.to_str().ok()?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(SubmissionId(raw.to_string()))
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<IntakeService<R>>>,
    headers: HeaderMap,
    axum::Json(payload): axum::Json<SubmissionPayload>,
) -> Response
where
    R: SubmissionRepository + 'static,
{
    let Some(id) = idempotency_key(&headers) else {
        let body = json!({ "message": "missing or malformed X-Idempotency-Key header" });
        return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
    };

    match service.receive(id, payload) {
        Ok(ReceivedSubmission::Accepted(stored)) => {
            (StatusCode::ACCEPTED, axum::Json(stored.receipt_view())).into_response()
        }
        Ok(ReceivedSubmission::Replayed(stored)) => {
            (StatusCode::OK, axum::Json(stored.receipt_view())).into_response()
        }
        Err(IntakeServiceError::Invalid(errors)) => {
            let body = json!({
                "message": "submission failed validation",
                "errors": errors,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response()
        }
        Err(IntakeServiceError::Repository(RepositoryError::Unavailable(detail))) => {
            let body = json!({ "message": format!("intake store unavailable: {detail}") });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(body)).into_response()
        }
        Err(other) => {
            let body = json!({ "message": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
        }
    }
}

pub(crate) async fn receipt_handler<R>(
    State(service): State<Arc<IntakeService<R>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    R: SubmissionRepository + 'static,
{
    let id = SubmissionId(submission_id);
    match service.get(&id) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored.receipt_view())).into_response(),
        Err(IntakeServiceError::Repository(RepositoryError::NotFound)) => {
            let body = json!({
                "id": id.0,
                "message": "no submission recorded under this key",
            });
            (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
        }
        Err(other) => {
            let body = json!({ "message": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
        }
    }
}

pub(crate) async fn health_handler() -> axum::Json<serde_json::Value> {
    axum::Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
