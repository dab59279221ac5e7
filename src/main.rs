//! Pagebin - a lightweight content sharing server
//!
//! Stores submitted snippets under short public ids, optionally behind a
//! generated view secret, and serves them until they expire.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Construct the configured page and session backends
//! 4. Start the background retention janitor
//! 5. Create Axum router with all endpoints
//! 6. Start HTTP server on configured port
//! 7. Handle graceful shutdown on SIGINT/SIGTERM

mod api;
mod auth;
mod config;
mod error;
mod models;
mod pages;
mod render;
mod session;
mod tasks;

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use tasks::spawn_janitor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagebin=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pagebin");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, auth_enabled={}, retention={}d, session_ttl={}s, page_backend={:?}, session_backend={}",
        config.server_port,
        config.auth_enabled,
        config.retention_days,
        config.session_ttl,
        config.page_backend,
        match &config.session_backend {
            config::SessionBackend::Memory => "memory",
            config::SessionBackend::Remote { .. } => "remote",
        }
    );

    // Construct backends and shared state
    let state = AppState::from_config(&config).context("failed to initialize storage backends")?;
    info!("Storage backends initialized");

    // Start the retention janitor
    let janitor_handle = spawn_janitor(
        state.pages.clone(),
        config.cleanup_interval,
        config.retention_window_ms(),
    );
    info!("Retention janitor started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(janitor_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the janitor task and allows graceful shutdown.
async fn shutdown_signal(janitor_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the janitor task
    janitor_handle.abort();
    warn!("Janitor task aborted");
}
