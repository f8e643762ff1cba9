//! API error type and its HTTP rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lumiere_storage::StoreError;
use thiserror::Error;
use tracing::error;

use crate::response::ApiResponse;
use crate::uploads::UploadError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, not owned by the caller, or not published. Rendered identically.
    #[error("not found")]
    NotFound,

    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(vec![message.into()])
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ApiResponse::failure("Invitation not found", None),
            ),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure("Validation failed", Some(errors.join("; "))),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::failure("Unauthorized", None),
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                ApiResponse::failure("Access denied", None),
            ),
            ApiError::Upload(e @ UploadError::UnsupportedType { .. }) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure("Validation failed", Some(e.to_string())),
            ),
            ApiError::Upload(
                e @ (UploadError::TooLarge { .. } | UploadError::BodyTooLarge(_)),
            ) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ApiResponse::failure("File too large", Some(e.to_string())),
            ),
            ApiError::Upload(UploadError::Multipart(e)) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure("Invalid upload", Some(e.clone())),
            ),
            ApiError::Upload(e @ UploadError::Io(_)) => {
                error!(error = %e, "upload failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure("Internal server error", None),
                )
            }
            ApiError::Internal(detail) => {
                error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure("Internal server error", None),
                )
            }
        };
        (status, body).into_response()
    }
}
