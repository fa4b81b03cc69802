//! Storewatch Server - loss-prevention submission service.
//!
//! This binary serves the register API the form frontend talks to.
//!
//! # Architecture
//!
//! - Axum HTTP surface (submissions + reference selectors)
//! - Google Sheets values API as the append-only store
//! - Reference tables (guard roster, catalog, warehouse users) cached
//!   in-memory with a 7-day TTL

#![cfg_attr(not(test), forbid(unsafe_code))]

use storewatch_server::config::RegisterConfig;
use storewatch_server::routes;
use storewatch_server::sheets::SheetsClient;
use storewatch_server::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = RegisterConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storewatch_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let sheets = SheetsClient::new(&config.sheets);
    let addr = config.socket_addr();
    let state = AppState::new(config, sheets);
    let app = routes::router(state);

    tracing::info!("register server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
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
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
