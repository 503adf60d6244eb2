//! Auxiliary table endpoints
//!
//! One `GET /api/<table>` route per declared listing, registered once when
//! the router is built. Table names never come from the request.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use warehouse_core::{Envelope, Record, TableListing};

use crate::error::ApiError;
use crate::state::AppState;

async fn list_table(
    state: AppState,
    listing: Arc<TableListing>,
) -> Result<Json<Envelope<Vec<Record>>>, ApiError> {
    let rows = state
        .store
        .list_table(&listing)
        .await
        .map_err(|e| ApiError::store("GET /api/{table}", listing.name(), e))?;

    Ok(Json(Envelope::ok(rows)))
}

/// Table routes
pub fn router(listings: Vec<TableListing>) -> Router<AppState> {
    listings.into_iter().fold(Router::new(), |router, listing| {
        let path = listing.route();
        let listing = Arc::new(listing);

        router.route(
            &path,
            get(move |State(state): State<AppState>| list_table(state, Arc::clone(&listing))),
        )
    })
}
