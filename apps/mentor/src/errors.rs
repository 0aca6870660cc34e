use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::mentoring::classifier::ClassificationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{"response": <message>}`, the same envelope as a success.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Lookup(String),

    #[error("Query classification failed: {0}")]
    Classification(#[from] ClassificationError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::Lookup(_) => StatusCode::BAD_REQUEST,
            AppError::Classification(e) => {
                tracing::error!("Classification error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // 500 bodies carry the error text verbatim; clients of this API rely on it.
        let body = Json(json!({ "response": self.to_string() }));

        (status, body).into_response()
    }
}
