//! Calcmon API Server
//!
//! This crate provides the monitoring service for the calculator platform:
//! a periodic aggregation loop that reduces raw event tables into labeled
//! gauges, and the HTTP surface that exposes them.
//!
//! # Architecture
//!
//! The server is built on Axum and Tokio, providing:
//! - `GET /metrics` - gauge snapshot in Prometheus exposition format
//! - `GET /health` - liveness, scrape counter, and collector status
//! - `POST /collect-now` - one synchronous aggregation pass
//!
//! A background task runs a pass immediately at startup and then after every
//! configured interval; the event store handle is created (and verified) before
//! the task starts and before any request handler runs.
//!
//! # Example
//!
//! ```no_run
//! use api::run_server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server().await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collector;
pub mod config;
pub mod db;
pub mod metrics;
mod routes;
mod state;

pub use config::Config;
pub use state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use shared::storage::ClickHouseEventStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use db::{Database, DatabaseConfig};

/// Runs the Calcmon API server.
///
/// This function initializes the server with configuration from environment
/// variables and starts listening for incoming connections. It handles
/// graceful shutdown on SIGTERM/SIGINT signals.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The event store cannot be reached at startup
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    run_server_with_config(config, db_config).await
}

/// Runs the Calcmon API server with the provided configuration.
///
/// This is useful for testing or when you want to provide configuration
/// programmatically.
///
/// # Errors
///
/// Returns an error if the store is unreachable, the server fails to bind,
/// or a fatal error occurs during operation.
pub async fn run_server_with_config(config: Config, db_config: DatabaseConfig) -> Result<()> {
    let addr = config.socket_addr();

    tracing::info!(
        host = %config.host,
        port = %config.port,
        db_url = %db_config.url,
        "Calcmon API server starting"
    );

    // The store connection is verified before the scheduler's first tick and
    // before any request handler runs; failure here is fatal.
    let database = Database::new(&db_config);
    database
        .ping()
        .await
        .context("Event store unreachable at startup")?;
    tracing::info!("Event store connection verified");

    let store = ClickHouseEventStore::new_shared(database.client());
    let state = AppState::new(store, config.collection)?;

    tokio::spawn(state.collector().run());

    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Creates the main application router with all routes and middleware.
///
/// This function is public to allow testing the router without starting a
/// full server.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes(state.clone()))
        .merge(routes::metrics_routes(state.clone()))
        .merge(routes::collect_routes(state))
        .layer(TraceLayer::new_for_http())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
