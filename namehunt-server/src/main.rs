//! Namehunt HTTP server.
//!
//! Serves the availability-checking pipeline to browser front ends: JSON
//! endpoints for one-shot operations and a server-sent-events endpoint for
//! streamed runs. Configuration follows the same file/environment layering
//! as the CLI; `NH_LISTEN` sets the bind address.

mod error;
mod handlers;
mod routes;
mod state;

use state::AppState;
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = namehunt_lib::resolve_config(None, false)?;
    let state = AppState::new(config)?;

    let addr: SocketAddr = std::env::var("NH_LISTEN")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, routes::app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("namehunt_server=info,namehunt_lib=info,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown handler");
        return;
    }
    tracing::info!("shutting down");
}
