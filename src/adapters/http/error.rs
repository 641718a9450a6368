//! Shared JSON error body for HTTP adapters.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    /// Body for a domain failure, keyed by its error code.
    pub fn from_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code.to_string(), message)
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::PatientNotFound | ErrorCode::SessionNotFound | ErrorCode::ChatbotNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::SessionCompleted => StatusCode::CONFLICT,
        ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a domain failure, hiding infrastructure detail from clients.
pub fn domain_error_response(code: ErrorCode, message: String) -> Response {
    let status = status_for(code);
    let body = if status.is_server_error() {
        tracing::error!(code = %code, error = %message, "Request failed");
        ErrorResponse::internal("Internal server error")
    } else {
        ErrorResponse::from_code(code, message)
    };
    (status, Json(body)).into_response()
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}
