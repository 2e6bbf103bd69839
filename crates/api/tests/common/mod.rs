#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::extract::Path;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use scout_api::config::{ServerConfig, UpstreamConfig};
use scout_api::router::build_app_router;
use scout_api::state::AppState;
use scout_client::upstream::DownloadClient;

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";

/// Build a test `ServerConfig` with safe defaults, pointing at `api_url`.
pub fn test_config(api_url: &str, with_credentials: bool) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upstream: UpstreamConfig {
            api_url: api_url.to_string(),
            client_id: with_credentials.then(|| CLIENT_ID.to_string()),
            client_secret: with_credentials.then(|| CLIENT_SECRET.to_string()),
        },
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(config: ServerConfig) -> Router {
    let downloads = DownloadClient::new(&config.upstream.api_url).unwrap();
    let state = AppState {
        config: Arc::new(config.clone()),
        downloads: Arc::new(downloads),
    };
    build_app_router(state, &config).unwrap()
}

/// App wired to a fresh fake catalog, with credentials.
pub async fn app_with_fake_catalog() -> Router {
    let api_url = spawn_fake_catalog().await;
    build_test_app(test_config(&api_url, true))
}

/// Serve a fake catalog download endpoint on an ephemeral port and return
/// its base URL (including the `/v3` prefix).
///
/// Uuids `missing`, `busy`, `broken` and `teapot` answer 404, 429, 503 and
/// 418; anything else succeeds. Wrong credentials answer 401.
pub async fn spawn_fake_catalog() -> String {
    let router = Router::new().route(
        "/v3/items/{uuid}/api-download",
        post(
            |Path(uuid): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                let authorized = headers.get("client-id").map(|v| v.as_bytes())
                    == Some(CLIENT_ID.as_bytes())
                    && headers.get("client-secret").map(|v| v.as_bytes())
                        == Some(CLIENT_SECRET.as_bytes());
                if !authorized {
                    return (StatusCode::UNAUTHORIZED, Json(json!({})));
                }
                match uuid.as_str() {
                    "missing" => (StatusCode::NOT_FOUND, Json(json!({}))),
                    "busy" => (StatusCode::TOO_MANY_REQUESTS, Json(json!({}))),
                    "broken" => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({}))),
                    "teapot" => (StatusCode::IM_A_TEAPOT, Json(json!({}))),
                    _ => (
                        StatusCode::OK,
                        Json(json!({
                            "download_url": format!(
                                "https://cdn.example.com/{uuid}.{}",
                                body["format"].as_str().unwrap_or("")
                            ),
                            "expires_at": "2030-01-01T00:00:00Z"
                        })),
                    ),
                }
            },
        ),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v3")
}

/// An address nothing is listening on.
pub fn unreachable_api_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v3")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
