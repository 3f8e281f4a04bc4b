//! Forwarding of the file store API.
//!
//! The web UI talks to `/upload`, `/files`, `/database_info` and `/download/{id}` on its
//! own origin. Each request is replayed against `upstream.base_url` with its path and
//! query string untouched. Upload bodies are read in full (bounded by
//! `limits.max_upload_mb`) before they are sent on; the upstream answer is streamed
//! back with its status code. Only the headers the UI depends on cross the gateway in
//! either direction.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, Method},
    response::Response,
};

use crate::error::{AppError, AppResult};
use crate::metrics::StoreRoute;
use crate::state::AppState;

const REQUEST_HEADERS: [HeaderName; 3] = [header::CONTENT_TYPE, header::CONTENT_LENGTH, header::ACCEPT];

const RESPONSE_HEADERS: [HeaderName; 3] =
    [header::CONTENT_TYPE, header::CONTENT_DISPOSITION, header::CONTENT_LENGTH];

pub async fn upload(State(state): State<AppState>, req: Request) -> AppResult<Response> {
    forward(&state, StoreRoute::Upload, req).await
}

pub async fn list_files(State(state): State<AppState>, req: Request) -> AppResult<Response> {
    forward(&state, StoreRoute::Files, req).await
}

pub async fn database_info(State(state): State<AppState>, req: Request) -> AppResult<Response> {
    forward(&state, StoreRoute::DatabaseInfo, req).await
}

pub async fn download(State(state): State<AppState>, req: Request) -> AppResult<Response> {
    forward(&state, StoreRoute::Download, req).await
}

async fn forward(state: &AppState, route: StoreRoute, req: Request) -> AppResult<Response> {
    let (parts, body) = req.into_parts();
    let path_and_query = parts.uri.path_and_query().map(|pq| pq.as_str()).unwrap_or_else(|| parts.uri.path());
    let url = state.upstream_url(path_and_query);
    tracing::debug!(method = %parts.method, %url, ?route, "forwarding to file store");

    let mut outgoing = HeaderMap::new();
    copy_headers(&parts.headers, &mut outgoing, &REQUEST_HEADERS);

    let mut request = state.http.request(parts.method.clone(), &url).headers(outgoing);
    if parts.method != Method::GET && parts.method != Method::HEAD {
        let bytes = axum::body::to_bytes(body, state.config.max_upload_bytes())
            .await
            .map_err(|e| AppError::BadRequest(format!("request body could not be read: {}", e)))?;
        if route == StoreRoute::Upload {
            state.metrics.add_uploaded_bytes(bytes.len() as u64);
        }
        request = request.body(bytes);
    }

    let upstream = request.send().await.map_err(|e| {
        state.metrics.inc_upstream_failures();
        tracing::warn!(%url, "file store request failed: {}", e);
        AppError::from(e)
    })?;
    state.metrics.inc_forwarded(route);

    let status = upstream.status();
    if status.is_server_error() {
        tracing::warn!(%url, %status, "file store answered with an error");
    }

    let mut res = axum::http::Response::builder().status(status);
    if let Some(headers) = res.headers_mut() {
        copy_headers(upstream.headers(), headers, &RESPONSE_HEADERS);
    }
    res.body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to build proxied response: {}", e)))
}

fn copy_headers(from: &HeaderMap, to: &mut HeaderMap, names: &[HeaderName]) {
    for name in names {
        if let Some(value) = from.get(name) {
            to.insert(name.clone(), value.clone());
        }
    }
}
