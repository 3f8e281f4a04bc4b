#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
        Router,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::routes::build_app;
    use crate::state::AppState;
    use crate::tests::{dead_address, spawn_fake_store, state_for};

    async fn send(app: Router, req: Request<Body>) -> Response {
        app.oneshot(req).await.unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn app_with_store() -> (Router, AppState) {
        let state = state_for(spawn_fake_store().await);
        (build_app(state.clone(), None), state)
    }

    #[tokio::test]
    async fn test_list_query_forwarded_verbatim() {
        let (app, state) = app_with_store().await;

        let response = send(app, get("/files?page=2&items_per_page=10&search=q%20report")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let v = json_body(response).await;
        assert_eq!(v["query"], "page=2&items_per_page=10&search=q%20report");
        assert_eq!(v["total_files"], 0);
        assert_eq!(state.metrics.get_snapshot().listings_forwarded, 1);
    }

    #[tokio::test]
    async fn test_database_info_forwarded() {
        let (app, _) = app_with_store().await;

        let response = send(app, get("/database_info")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let v = json_body(response).await;
        assert_eq!(v["total_files"], 3);
        assert_eq!(v["latest_upload"], "notes.txt");
    }

    #[tokio::test]
    async fn test_download_keeps_disposition() {
        let (app, state) = app_with_store().await;

        let response = send(app, get("/download/1")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers().clone();
        assert_eq!(headers[header::CONTENT_DISPOSITION], "attachment; filename=\"notes.txt\"");
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        assert!(!headers.contains_key(header::CONTENT_ENCODING));
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"hello from the store");
        assert_eq!(state.metrics.get_snapshot().downloads_forwarded, 1);
    }

    #[tokio::test]
    async fn test_upstream_status_passed_through() {
        let (app, _) = app_with_store().await;

        let response = send(app, get("/download/999")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["detail"], "File not found");
    }

    #[tokio::test]
    async fn test_multipart_upload_forwarded() {
        let (app, state) = app_with_store().await;
        let content_type = "multipart/form-data; boundary=XBOUNDARY";
        let payload = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"report.pdf\"\r\n\
            Content-Type: application/pdf\r\n\r\n\
            %PDF-1.4 test\r\n\
            --XBOUNDARY--\r\n";

        let req = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, payload.len())
            .body(Body::from(payload))
            .unwrap();
        let response = send(app, req).await;

        assert_eq!(response.status(), StatusCode::OK);
        let v = json_body(response).await;
        assert_eq!(v["filename"], "report.pdf");
        assert_eq!(v["content_type"], content_type);
        assert_eq!(v["received_bytes"], payload.len());
        assert_eq!(v["has_file_part"], true);

        let snapshot = state.metrics.get_snapshot();
        assert_eq!(snapshot.uploads_forwarded, 1);
        assert_eq!(snapshot.bytes_uploaded, payload.len() as u64);
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected() {
        let mut state = state_for(spawn_fake_store().await);
        let mut config = (*state.config).clone();
        config.limits.max_upload_mb = 1;
        state.config = std::sync::Arc::new(config);
        let app = build_app(state.clone(), None);
        let payload = vec![b'x'; 2 * 1024 * 1024];

        let req = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .header(header::CONTENT_LENGTH, payload.len())
            .body(Body::from(payload))
            .unwrap();
        let response = send(app, req).await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(state.metrics.get_snapshot().uploads_forwarded, 0);
    }

    #[tokio::test]
    async fn test_upstream_down_is_bad_gateway() {
        let state = state_for(dead_address().await);
        let app = build_app(state.clone(), None);

        let response = send(app, get("/files?page=1&items_per_page=10&search=")).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let v = json_body(response).await;
        assert_eq!(v["error"]["code"], "UPSTREAM_UNAVAILABLE");
        assert_eq!(v["status"], 502);
        assert_eq!(state.metrics.get_snapshot().upstream_failures, 1);
    }

    #[tokio::test]
    async fn test_unknown_route_without_ui() {
        let (app, _) = app_with_store().await;

        let response = send(app, get("/nope")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_static_ui_with_spa_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>ablage-index</html>").unwrap();
        std::fs::write(dir.path().join("app.css"), "body{}").unwrap();
        let state = state_for(spawn_fake_store().await);
        let app = build_app(state, Some(dir.path().to_path_buf()));

        let response = send(app.clone(), get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&body).contains("ablage-index"));

        let response = send(app.clone(), get("/some/client/route")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&body).contains("ablage-index"));

        let response = send(app.clone(), get("/app.css")).await;
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=31536000, immutable");

        // API routes win over the static fallback
        let response = send(app, get("/database_info")).await;
        assert_eq!(json_body(response).await["total_files"], 3);
    }
}
