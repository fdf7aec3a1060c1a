use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::import::decoder::DecodeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Extraction is disabled (config {0})")]
    ExtractionDisabled(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut missing_fields: Option<Vec<String>> = None;

        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Decode(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DECODE_ERROR",
                e.to_string(),
            ),
            AppError::Extraction(e) => match e {
                ExtractionError::EmptyDocument { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EMPTY_DOCUMENT",
                    e.to_string(),
                ),
                ExtractionError::ProfileValidation { missing, .. } => {
                    missing_fields = Some(missing.clone());
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "PROFILE_VALIDATION_ERROR",
                        e.to_string(),
                    )
                }
            },
            AppError::ExtractionDisabled(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "EXTRACTION_DISABLED",
                "Résumé import is currently disabled".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(missing) = missing_fields {
            error["missing_fields"] = json!(missing);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
