use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cpso_search::diagnostics::FileSnapshotSink;
use cpso_search::scrape::{BrowserAttempt, RegistrySearcher};
use cpso_search::server::{build_router, AppState};
use cpso_search::{Config, SessionGate};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cpso_search=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!("Starting with config: {:?}", config);

    let gate = SessionGate::new(config.max_sessions, config.headless);
    let sink = Arc::new(FileSnapshotSink::new(&config.snapshot_dir));
    let attempt = Arc::new(BrowserAttempt::new(gate, sink));
    let searcher = Arc::new(RegistrySearcher::new(attempt));

    let app = build_router(AppState { searcher });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("Server running on port {}", config.port);
    info!("Health check: http://localhost:{}/api/health", config.port);
    info!("Search endpoint: http://localhost:{}/api/search", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
