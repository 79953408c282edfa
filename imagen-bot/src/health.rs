//! Health check HTTP server powered by axum.
//!
//! Serves `GET /health` for the hosting platform's probe (Render pings this to
//! keep the service alive). Runs alongside the Telegram polling loop.

use axum::{routing::get, Router};
use std::net::SocketAddr;

/// Build the axum router for the health server.
pub fn build_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// GET /health — plain-text probe response.
async fn health_check() -> &'static str {
    "OK"
}

/// Start the health server on `0.0.0.0:port`.
///
/// This runs until the process exits — call from `tokio::spawn`.
pub async fn serve(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Health server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, build_router()).await?;

    Ok(())
}
