//! HTTP routes

pub mod health;
pub mod products;
pub mod tables;

use axum::Router;
use warehouse_core::TableListing;

use crate::state::AppState;

/// All routes, before middleware and state are attached.
pub fn router(listings: Vec<TableListing>) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(tables::router(listings))
}
