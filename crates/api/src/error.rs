use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scout_client::UpstreamError;
use serde_json::{json, Value};
use validator::ValidationErrors;

/// Message for any request body that cannot be accepted.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
/// `{ "error": <message>, "code": <CODE> }`, plus `"details"` for
/// validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body failed to parse or validate.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The server is missing settings it needs for this request.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The catalog refused or failed the request.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Anything else. The message is passed through to the caller.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation {
            message: INVALID_BODY_MESSAGE.to_string(),
            details: serde_json::to_value(&errors).unwrap_or(Value::Null),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            message: INVALID_BODY_MESSAGE.to_string(),
            details: json!([{ "message": rejection.body_text() }]),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Validation { message, .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
            }
            AppError::Configuration(msg) => {
                tracing::error!(error = %msg, "Server misconfigured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::Upstream(err) => classify_upstream_error(err),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let AppError::Validation { details, .. } = self {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a catalog error into an HTTP status, error code, and message.
///
/// - 401, 404 and 429 keep their status with a fixed message.
/// - Any other upstream status is passed through as `UPSTREAM_ERROR`.
/// - Transport failures map to 500 with the failure text.
fn classify_upstream_error(err: &UpstreamError) -> (StatusCode, &'static str, String) {
    match err {
        UpstreamError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.to_string()),
        UpstreamError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        UpstreamError::RateLimited => {
            (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", err.to_string())
        }
        UpstreamError::Status { status, .. } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            "UPSTREAM_ERROR",
            err.to_string(),
        ),
        UpstreamError::Client(client) => {
            tracing::error!(error = %client, "Catalog request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                client.to_string(),
            )
        }
    }
}
