//! Banner and health check endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tracing::warn;

use crate::state::AppState;

/// Text served at `/`.
pub const BANNER: &str = "Warehouse backend is running. Use /api/products for product endpoints.";

/// GET /
async fn banner() -> &'static str {
    BANNER
}

/// GET /health
///
/// `OK` when the store answers `SELECT 1`, otherwise `503`.
async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
    }
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
}
