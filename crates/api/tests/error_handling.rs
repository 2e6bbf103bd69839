//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use scout_api::error::AppError;
use scout_client::{ClientError, UpstreamError};
use serde_json::json;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("Asset UUID is required".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Asset UUID is required");
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn validation_error_carries_details() {
    let err = AppError::Validation {
        message: "Invalid request body".into(),
        details: json!({ "format": [{ "message": "Format is required" }] }),
    };

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"]["format"][0]["message"], "Format is required");
}

#[tokio::test]
async fn configuration_error_returns_500() {
    let (status, json) = error_to_response(AppError::Configuration("credentials missing".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "CONFIGURATION_ERROR");
    assert_eq!(json["error"], "credentials missing");
}

#[tokio::test]
async fn upstream_unauthorized_returns_401() {
    let (status, json) = error_to_response(UpstreamError::Unauthorized.into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid API credentials");
}

#[tokio::test]
async fn upstream_other_status_is_passed_through() {
    let err = UpstreamError::Status {
        status: 502,
        reason: "Bad Gateway".into(),
    };

    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "Download failed: Bad Gateway");
}

#[tokio::test]
async fn upstream_transport_failure_returns_500_with_message() {
    let err = UpstreamError::Client(ClientError::InvalidUrl("nope".into()));

    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "Invalid URL: nope");
}

#[tokio::test]
async fn internal_error_returns_500_with_message() {
    let (status, json) = error_to_response(AppError::InternalError("boom".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "boom");
}
