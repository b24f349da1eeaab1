//! Claims Triage API Server Binary
//!
//! Starts the HTTP API over the mock-backed triage workflows.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin triage-api
//!
//! # Run with environment variables
//! API_PORT=9090 API_MOCK__LATENCY__UPLOAD_MS=0 cargo run --bin triage-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_MAX_UPLOAD_MB` - Largest accepted claims file (default: 10)
//! * `API_PROGRESS_TICK_MS` - Upload progress tick (default: 200)
//! * `API_ACTOR` - Name recorded on notes and audit entries (default: Current User)
//! * `API_MOCK__LATENCY__*_MS` - Simulated latency per mock service
//! * `API_MOCK__UPLOAD__SUCCESS_RATE`, `API_MOCK__UPLOAD__SEED` - Mock upload outcome

use anyhow::Context;
use interface_api::{config::ApiConfig, create_router, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, loads the mock services and
/// starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        max_upload_mb = config.max_upload_mb,
        "Starting Claims Triage API Server"
    );

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    let state = AppState::from_config(config).context("failed to load mock services")?;

    // Fill the store before the first request
    if let Err(e) = state.app.claims_view.load().await {
        tracing::warn!(error = %e, "Initial claims load failed; starting with an empty store");
    }

    let app = create_router(state);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from the environment, falling back to defaults
fn load_config() -> ApiConfig {
    match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid API configuration ({}), using defaults", e);
            ApiConfig::default()
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
