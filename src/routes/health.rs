use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::time::Duration;

const READY_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

// Liveness - never touches the file store
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness: the file store must answer /database_info
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let url = state.upstream_url("/database_info");
    let probe = state.http.get(&url).send();
    match tokio::time::timeout(READY_PROBE_TIMEOUT, probe).await {
        Ok(Ok(res)) if res.status().is_success() => (StatusCode::OK, "ready".to_string()),
        Ok(Ok(res)) => {
            (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: file store answered {}", res.status()))
        }
        Ok(Err(e)) => {
            tracing::debug!("readiness probe failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e))
        }
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout".to_string()),
    }
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

pub async fn version(State(state): State<AppState>) -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "upstream": state.config.upstream_base(),
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
