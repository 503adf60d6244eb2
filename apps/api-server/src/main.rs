//! # Warehouse API
//!
//! Binary entry point.
//!
//! ## Startup
//! ```text
//! load config ──► connect pool ──► SELECT 1 ──► register routes ──► serve
//!      │                │               │
//!      └────────────────┴───────────────┴──► log + exit(1)
//! ```

use std::process;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use warehouse_api::{build_router, cors_layer, AppState, ServerConfig};
use warehouse_core::TableListing;
use warehouse_db::Database;

const DEFAULT_LOG_FILTER: &str = "info,warehouse=debug,sqlx=warn";

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();

    info!("Starting warehouse API server...");

    if let Err(e) = run().await {
        error!(error = %e, "Server failed");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        port = config.port,
        db = ?config.db,
        cors_origin = %config.cors_origin,
        "Configuration loaded"
    );

    // Connect to database
    let db = match Database::connect(config.db.clone()).await {
        Ok(db) => db,
        Err(e) => {
            error!(
                store = %config.db.connection_label(),
                "Database connection failed. Check that MySQL is running and the DB_* settings are correct"
            );
            return Err(e.into());
        }
    };

    // Declared auxiliary tables
    let listings = TableListing::auxiliary()?;
    info!(tables = listings.len(), "Registering table endpoints");

    let state = AppState::new(Arc::new(db.clone()));
    let app = build_router(state, listings, cors_layer(&config.cors_origin)?);

    // Bind listener
    let addr = config.bind_address();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting shutdown");
        }
    }
}
