//! Product endpoints
//!
//! ```text
//! GET    /api/products        list, joined with category name
//! POST   /api/products        create, 201 with the stored row
//! GET    /api/products/{id}   one row
//! PUT    /api/products/{id}   whitelisted partial update
//! DELETE /api/products/{id}   delete, reports affectedRows
//! ```
//!
//! Create and update re-read the row after writing. The two statements are
//! not wrapped in a transaction, so a concurrent delete shows up as `404`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::debug;

use warehouse_core::whitelist::PRODUCT_UPDATE_FIELDS;
use warehouse_core::{CoreError, Envelope, NewProduct, Record, RecordId};

use crate::error::ApiError;
use crate::extract::{BodyRecord, ValidId};
use crate::state::AppState;

const RESOURCE: &str = "products";
const NOT_FOUND_LABEL: &str = "Product";

/// GET /api/products
async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Record>>>, ApiError> {
    let products = state
        .store
        .list_products()
        .await
        .map_err(|e| ApiError::store("GET /api/products", RESOURCE, e))?;

    Ok(Json(Envelope::ok(products)))
}

/// GET /api/products/{id}
async fn get_product(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Envelope<Record>>, ApiError> {
    let product = fetch(&state, id, "GET /api/products/{id}").await?;
    Ok(Json(Envelope::ok(product)))
}

/// POST /api/products
async fn create_product(
    State(state): State<AppState>,
    BodyRecord(body): BodyRecord,
) -> Result<(StatusCode, Json<Envelope<Record>>), ApiError> {
    const ENDPOINT: &str = "POST /api/products";

    let product = NewProduct::from_record(&body);
    let id = state
        .store
        .insert_product(&product)
        .await
        .map_err(|e| ApiError::store(ENDPOINT, RESOURCE, e))?;

    debug!(%id, "Product created, reading back");
    let created = fetch(&state, id, ENDPOINT).await?;

    Ok((StatusCode::CREATED, Json(Envelope::ok(created))))
}

/// PUT /api/products/{id}
async fn update_product(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    BodyRecord(body): BodyRecord,
) -> Result<Json<Envelope<Record>>, ApiError> {
    const ENDPOINT: &str = "PUT /api/products/{id}";

    let update = PRODUCT_UPDATE_FIELDS.build_update(&body)?;
    let affected = state
        .store
        .update_product(id, &update)
        .await
        .map_err(|e| ApiError::store(ENDPOINT, format!("{}/{}", RESOURCE, id), e))?;

    let updated = fetch(&state, id, ENDPOINT).await?;

    Ok(Json(Envelope::ok_with_affected(updated, affected)))
}

/// DELETE /api/products/{id}
async fn delete_product(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Envelope>, ApiError> {
    let affected = state
        .store
        .delete_product(id)
        .await
        .map_err(|e| {
            ApiError::store("DELETE /api/products/{id}", format!("{}/{}", RESOURCE, id), e)
        })?;

    Ok(Json(Envelope::affected(affected)))
}

/// Loads one product or answers `404 Product not found`.
async fn fetch(state: &AppState, id: RecordId, endpoint: &'static str) -> Result<Record, ApiError> {
    let found = state
        .store
        .get_product(id)
        .await
        .map_err(|e| ApiError::store(endpoint, format!("{}/{}", RESOURCE, id), e))?;

    found.ok_or_else(|| CoreError::not_found(NOT_FOUND_LABEL).into())
}

/// Product routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
