use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The kinds matter to callers: validation failures must be corrected by the
/// user, upstream failures may be retried or routed to the heuristic path,
/// malformed responses are non-retryable for the same prompt.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream(msg) => {
                tracing::error!("upstream failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Evaluation failed: model backend unavailable".to_string(),
                )
            }
            AppError::MalformedResponse(msg) => {
                tracing::error!("malformed model response: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse AI response".to_string(),
                )
            }
            AppError::Store(StoreError::AlreadyEvaluated(user_id)) => (
                StatusCode::CONFLICT,
                format!("Evaluation already exists for user {user_id}"),
            ),
            AppError::Store(StoreError::NotFound(user_id)) => (
                StatusCode::NOT_FOUND,
                format!("No evaluation found for user {user_id}"),
            ),
            AppError::Store(e) => {
                tracing::error!("store failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
