use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use wc_core::config::AppConfig;

use super::config::DEFAULT_JWT_SECRET;
use super::wiring::build_state;
use crate::routes::router;

/// Builds everything from `config` and serves until Ctrl-C.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    if config.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("JWT_SECRET is not set, using the built-in default. Tokens are forgeable; set a secret for any real deployment");
    }
    info!(config = ?config, "Starting weicopy");

    let state = build_state(&config)?;
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
