//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use holonet_core::error::HolonetError;

use crate::middleware::current_request_id;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// Missing or wrong API key.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    /// Not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message)
    }

    /// Internal server error. The message is never the cause itself.
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An unexpected error occurred",
        )
    }

    /// HTTP status of the error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Server-side failures carry the correlation id so they can be found in the logs.
        let request_id = if self.status.is_server_error() {
            current_request_id()
        } else {
            None
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                request_id,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<HolonetError> for ApiError {
    fn from(err: HolonetError) -> Self {
        match &err {
            HolonetError::NotFound { .. } | HolonetError::PageNotFound { .. } => {
                ApiError::not_found(err.to_string())
            }
            HolonetError::RateLimited => {
                warn!("Upstream is throttling us");
                ApiError::new(StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", err.to_string())
            }
            HolonetError::TimedOut { .. } | HolonetError::ConnectionTimeout(_) => {
                warn!(error = %err, "Upstream unavailable");
                let message = if err.is_client_visible() {
                    err.to_string()
                } else {
                    "The upstream service did not respond in time".to_string()
                };
                ApiError::new(StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT", message)
            }
            HolonetError::Upstream(_) => {
                error!(error = %err, "Upstream error");
                ApiError::new(
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The upstream service returned an unexpected response",
                )
            }
            HolonetError::Validation(_) => ApiError::validation(err.to_string()),
            HolonetError::InvalidReference(_)
            | HolonetError::Json(_)
            | HolonetError::Config(_) => {
                error!(error = %err, "Internal error");
                ApiError::internal()
            }
        }
    }
}
