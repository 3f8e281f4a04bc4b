#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use std::net::SocketAddr;
    use tower::ServiceExt;

    use crate::routes::build_app;
    use crate::tests::{dead_address, spawn_fake_store, state_for};

    fn setup_test_app(upstream: SocketAddr) -> Router {
        build_app(state_for(upstream), None)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_healthz_endpoint() {
        let app = setup_test_app(dead_address().await);

        let (status, body) = get(app, "/healthz").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_version_endpoint() {
        let upstream = spawn_fake_store().await;
        let app = setup_test_app(upstream);

        let (status, body) = get(app, "/version").await;

        assert_eq!(status, StatusCode::OK);
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["name"], "ablage");
        assert!(!v["version"].as_str().unwrap().is_empty());
        assert_eq!(v["upstream"], format!("http://{}", upstream));
    }

    #[tokio::test]
    async fn test_readyz_endpoint_ok() {
        let app = setup_test_app(spawn_fake_store().await);

        let (status, body) = get(app, "/readyz").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"ready");
    }

    #[tokio::test]
    async fn test_readyz_upstream_down() {
        let app = setup_test_app(dead_address().await);

        let (status, body) = get(app, "/readyz").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(String::from_utf8_lossy(&body).starts_with("not ready"));
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = setup_test_app(dead_address().await);

        let (status, body) = get(app, "/metrics").await;

        assert_eq!(status, StatusCode::OK);
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["uploads_forwarded"], 0);
        assert_eq!(v["listings_forwarded"], 0);
        assert_eq!(v["downloads_forwarded"], 0);
        assert_eq!(v["upstream_failures"], 0);
        assert!(v["uptime_seconds"].is_u64());
    }

    #[tokio::test]
    async fn test_security_headers_applied() {
        let app = setup_test_app(dead_address().await);

        let response =
            app.oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap()).await.unwrap();

        let headers = response.headers();
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
        assert_eq!(headers["cache-control"], "no-store");
    }
}
