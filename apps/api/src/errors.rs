use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::provider::CatalogLoadError;
use crate::recommend::skill::SkillError;
use crate::users::store::UserStoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<UserStoreError> for AppError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::UserNotFound(_) | UserStoreError::UsernameNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            UserStoreError::SkillNotOnRoster(_) => AppError::NotFound(err.to_string()),
            UserStoreError::EmptyUsername => AppError::Validation(err.to_string()),
            UserStoreError::UsernameTaken(_) | UserStoreError::DuplicateSkill(_) => {
                AppError::Conflict(err.to_string())
            }
            UserStoreError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<CatalogLoadError> for AppError {
    fn from(err: CatalogLoadError) -> Self {
        match err {
            CatalogLoadError::Unavailable(msg) => AppError::CatalogUnavailable(msg),
            CatalogLoadError::Invalid(e) => AppError::Internal(e.into()),
        }
    }
}

impl From<SkillError> for AppError {
    fn from(err: SkillError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::CatalogUnavailable(msg) => {
                tracing::error!("Catalog unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CATALOG_UNAVAILABLE",
                    "The career catalog is unavailable".to_string(),
                )
            }
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

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
