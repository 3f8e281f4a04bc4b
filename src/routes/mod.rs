//! HTTP routes of the Ablage host.
//!
//! - `health`: liveness, readiness, metrics and version endpoints
//! - `proxy`: the file store API, forwarded to the configured upstream
//!
//! Everything else is served from the built web UI.

pub mod health;
pub mod proxy;

use std::path::PathBuf;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::middleware::from_fn_with_state;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::compression::predicate::{DefaultPredicate, Predicate};
use tower_http::{
    compression::CompressionLayer,
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::error::AppError;
use crate::middleware::security_headers::security_headers_middleware;
use crate::state::AppState;

// Downloads are passed through byte for byte.
#[derive(Clone)]
struct NoDownloadDefault(DefaultPredicate);

impl Predicate for NoDownloadDefault {
    fn should_compress<B: axum::body::HttpBody>(&self, res: &axum::http::Response<B>) -> bool {
        if res.headers().contains_key(CONTENT_DISPOSITION) {
            return false;
        }
        let is_octet = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .is_some_and(|s| s.starts_with("application/octet-stream"));
        !is_octet && self.0.should_compress(res)
    }
}

/// The API routes without state, fallback or layers.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/version", get(health::version))
        .route("/upload", post(proxy::upload))
        .route("/files", get(proxy::list_files))
        .route("/database_info", get(proxy::database_info))
        .route("/download/{id}", get(proxy::download))
}

/// Builds the complete application: API routes, the static UI (with SPA fallback to
/// `index.html`) when `ui_root` is given, and the middleware stack.
pub fn build_app(state: AppState, ui_root: Option<PathBuf>) -> Router {
    let cfg = state.config.clone();
    let body_limit = cfg.max_upload_bytes();

    let router = match ui_root {
        Some(root) => {
            let index = root.join("index.html");
            let static_ui =
                ServeDir::new(root).append_index_html_on_directories(true).fallback(ServeFile::new(index));
            api_router().fallback_service(static_ui)
        }
        None => api_router().fallback(not_found),
    };

    router
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CompressionLayer::new().compress_when(NoDownloadDefault(DefaultPredicate::new())))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cfg, security_headers_middleware))
}

async fn not_found() -> AppError {
    AppError::NotFound("no such route and no web UI configured".to_string())
}
