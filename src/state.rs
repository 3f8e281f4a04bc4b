use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::metrics::Metrics;

/// The shared application state.
///
/// Cloned into every handler by axum. Holds the configuration, one pooled HTTP client
/// for talking to the upstream store, and the forwarding counters.
#[derive(Clone)]
pub struct AppState {
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Client used for every upstream request.
    ///
    /// Built once so connections to the store are reused across requests.
    pub http: reqwest::Client,
    /// Counters exposed by `/metrics`.
    pub metrics: Metrics,
}

impl AppState {
    /// Creates the state and the upstream client (request timeout from
    /// `upstream.timeout_secs`, redirects not followed).
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { config: Arc::new(config), http, metrics: Metrics::new() })
    }

    /// Absolute upstream URL for a path-and-query like `/files?page=1`.
    pub fn upstream_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.config.upstream_base(), path_and_query)
    }
}
