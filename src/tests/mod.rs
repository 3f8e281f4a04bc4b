//! Tests for the Ablage host.
//!
//! - **config_tests**: configuration layering and validation
//! - **error_tests**: error display, status codes and JSON bodies
//! - **health_api_tests**: liveness, readiness, metrics and version endpoints
//! - **proxy_api_tests**: forwarding of the file store API against a fake upstream
//!
//! The fake upstream below is a small axum app bound to an ephemeral port that answers
//! like the remote store does.

pub mod health_api_tests;
pub mod proxy_api_tests;

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{Path, RawQuery},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::config::AppConfig;
use crate::state::AppState;

async fn fake_upload(headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let content_type = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()).unwrap_or("").to_string();
    let has_part = String::from_utf8_lossy(&body).contains("filename=\"report.pdf\"");
    Json(json!({
        "id": 7,
        "filename": "report.pdf",
        "content_type": content_type,
        "received_bytes": body.len(),
        "has_file_part": has_part,
    }))
}

async fn fake_files(RawQuery(query): RawQuery) -> impl IntoResponse {
    Json(json!({ "files": [], "total_files": 0, "query": query }))
}

async fn fake_database_info() -> impl IntoResponse {
    Json(json!({
        "total_files": 3,
        "total_size_mb": 1.5,
        "latest_upload": "notes.txt",
        "latest_upload_date": "2024-05-01T12:00:00",
    }))
}

async fn fake_download(Path(id): Path<String>) -> impl IntoResponse {
    if id == "1" {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/plain"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"notes.txt\""),
            ],
            "hello from the store",
        )
            .into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "detail": "File not found" }))).into_response()
    }
}

/// Starts the fake store and returns its address.
pub(crate) async fn spawn_fake_store() -> SocketAddr {
    let app = Router::new()
        .route("/upload", post(fake_upload))
        .route("/files", get(fake_files))
        .route("/database_info", get(fake_database_info))
        .route("/download/{id}", get(fake_download));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// An address nothing listens on.
pub(crate) async fn dead_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub(crate) fn state_for(upstream: SocketAddr) -> AppState {
    let mut config = AppConfig::default();
    config.upstream.base_url = format!("http://{}/", upstream);
    config.upstream.timeout_secs = 5;
    AppState::new(config).unwrap()
}
