//! Telemetry ingress binary.
//!
//! Starts the axum HTTP service with structured logging and graceful
//! shutdown on SIGTERM/SIGINT.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the listen address.
const ENV_INGEST_ADDR: &str = "APIDIFF_INGEST_ADDR";

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr: SocketAddr = std::env::var(ENV_INGEST_ADDR)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address, is another process using this port?");

    tracing::info!(%addr, "starting telemetry ingress");

    axum::serve(listener, apidiff_ingest::app())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("telemetry ingress shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
