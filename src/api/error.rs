//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::backend::BackendError;
use crate::flow::FlowError;
use crate::models::{ProfileError, UnknownCategory};

/// Structured error response body for JSON clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Prediction service unavailable: {0}")]
    BackendUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BackendUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            ApiError::NotFound(detail) => ("NOT_FOUND", detail),
            ApiError::BadRequest(detail) => ("BAD_REQUEST", detail),
            ApiError::BackendUnavailable(detail) => ("BACKEND_UNAVAILABLE", detail),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                ("INTERNAL", "An internal error occurred".to_string())
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<UnknownCategory> for ApiError {
    fn from(err: UnknownCategory) -> Self {
        FlowError::from(err).into()
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Application {
                status: 404,
                message,
            } => ApiError::NotFound(message.unwrap_or_else(|| "No recommendations found".into())),
            BackendError::Application {
                status: 400..=499,
                message,
            } => ApiError::BadRequest(
                message.unwrap_or_else(|| "Prediction service rejected the request".into()),
            ),
            other => ApiError::BackendUnavailable(other.to_string()),
        }
    }
}
