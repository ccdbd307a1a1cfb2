use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use crate::db::RepoError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request body failed to bind or violated DTO constraints.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> Value {
        match self {
            AppError::Validation(messages) => json!(messages),
            AppError::Unauthorized(msg) | AppError::Forbidden(msg) | AppError::NotFound(msg) => {
                json!(msg)
            }
            // never leak internals to the client
            AppError::Internal(_) => json!("Internal server error"),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(e) = &self {
            error!(error = ?e, "request failed");
        }
        let status = self.status_code();
        let body = json!({
            "status_code": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}
