use std::net::SocketAddr;
use std::path::PathBuf;

use ablage::{config, routes, state::AppState};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEV_UI_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/webui/dist");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging (stdout + tägliche Datei-Rotation unter ./logs)
    std::fs::create_dir_all("logs").ok();
    let (stdout_nb, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let file_appender = tracing_appender::rolling::daily("logs", "ablage.log");
    let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stdout_nb))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb))
        .init();
    // Guards am Leben halten, damit die Non-Blocking Writer beim Beenden flushen
    let _log_guards = (stdout_guard, file_guard);

    // Konfiguration: eingebettete Defaults -> ablage.toml -> ABLAGE_CONFIG -> env/.env
    let app_cfg = config::load()?;
    info!("Forwarding file store API to {}", app_cfg.upstream_base());

    let ui_root = resolve_ui_dir(app_cfg.ui_dir());
    match &ui_root {
        Some(dir) => info!("Serving web UI from {}", dir.display()),
        None => warn!("No built web UI found; only the API is served"),
    }

    let port: u16 = app_cfg.server.port;
    let host: String = app_cfg.server.host.clone();
    let state = AppState::new(app_cfg)?;
    let app = routes::build_app(state, ui_root);

    // CORS: in Debug permissiv (trunk serve auf eigenem Port), in Release same-origin
    let app = if cfg!(debug_assertions) { app.layer(CorsLayer::permissive()) } else { app };

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen addr {}:{} - {}", host, port, e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Ablage listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Configured directory first, then `<exe_dir>/ui`, then the trunk output of the source
/// tree. A candidate counts only if it holds an `index.html`.
fn resolve_ui_dir(configured: Option<PathBuf>) -> Option<PathBuf> {
    let runtime_ui = std::env::current_exe().ok().and_then(|p| p.parent().map(|d| d.join("ui")));
    configured
        .into_iter()
        .chain(runtime_ui)
        .chain(std::iter::once(PathBuf::from(DEV_UI_DIR)))
        .find(|dir| dir.join("index.html").is_file())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received. Stopping server...");
}
