//! # Warehouse API
//!
//! REST surface over the warehouse MySQL schema.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Warehouse API Server                           │
//! │                                                                         │
//! │  Frontend ───► HTTP (3001) ───► CORS ───► Trace ───► Router            │
//! │                                                        │                │
//! │         ┌──────────────────────┬───────────────────────┤                │
//! │         ▼                      ▼                       ▼                │
//! │  ┌──────────────┐   ┌───────────────────┐   ┌────────────────────────┐ │
//! │  │  health      │   │  products         │   │  tables                │ │
//! │  │              │   │                   │   │                        │ │
//! │  │ • /          │   │ • list / create   │   │ • GET /api/<table>     │ │
//! │  │ • /health    │   │ • get / put / del │   │   (13 declared tables) │ │
//! │  └──────────────┘   └───────────────────┘   └────────────────────────┘ │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                     Arc<dyn ResourceStore>  ───►  MySQL pool            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME` - MySQL
//!   (defaults: 127.0.0.1, 3306, root, empty, warehouse_db)
//! - `DB_CONNECTION_LIMIT` - pool size (default: 10)
//! - `PORT` - HTTP listen port (default: 3001)
//! - `BIND_ADDR` - listen interface (default: 0.0.0.0)
//! - `CORS_ORIGIN` - allowed origin (default: http://localhost:3000)
//! - `RUST_LOG` - log filter

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

#[cfg(test)]
mod testing;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::trace::TraceLayer;

use warehouse_core::TableListing;

// Re-exports
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use state::AppState;

/// CORS policy allowing a single origin.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, ConfigError> {
    let origin: HeaderValue = origin
        .parse()
        .map_err(|_| ConfigError::InvalidValue("CORS_ORIGIN".to_string()))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Builds the full application: routes, middleware and state.
pub fn build_router(state: AppState, listings: Vec<TableListing>, cors: CorsLayer) -> Router {
    routes::router(listings)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::DEFAULT_CORS_ORIGIN;
    use crate::routes::health::BANNER;
    use crate::testing::MemoryStore;
    use warehouse_core::Record;

    fn app(store: Arc<MemoryStore>) -> Router {
        let listings = TableListing::auxiliary().unwrap();
        let cors = cors_layer(DEFAULT_CORS_ORIGIN).unwrap();
        build_router(AppState::new(store), listings, cors)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, value)
    }

    async fn send_form(app: &Router, method: &str, uri: &str, form: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn create(app: &Router, body: Value) -> u64 {
        let (status, response) = send(app, "POST", "/api/products", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{response}");
        response["data"]["product_id"].as_u64().unwrap()
    }

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_banner_and_health() {
        let store = Arc::new(MemoryStore::new());
        let app = app(store.clone());

        let (status, body) = send(&app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String(BANNER.to_string()));

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("OK"));

        store.fail_with("Connection refused");
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!("UNAVAILABLE"));
    }

    #[tokio::test]
    async fn test_get_product_statuses() {
        let app = app(Arc::new(MemoryStore::new()));
        let id = create(&app, json!({ "sku": "BOLT-M8", "product_name": "Bolt" })).await;

        let (status, body) = send(&app, "GET", "/api/products/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "error": "Invalid id" }));

        let (status, body) = send(&app, "GET", "/api/products/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "success": false, "error": "Product not found" }));

        let (status, body) = send(&app, "GET", &format!("/api/products/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["product_id"], id);
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let app = app(Arc::new(MemoryStore::new()));

        let (status, body) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({ "sku": "NUT-M8", "product_name": "Nut", "unit": "" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let data = &body["data"];
        assert_eq!(data["sku"], "NUT-M8");
        assert_eq!(data["category_id"], Value::Null);
        assert_eq!(data["description"], Value::Null);
        assert_eq!(data["unit"], Value::Null);
        assert_eq!(data["purchase_price"], 0);
        assert_eq!(data["selling_price"], 0);
        assert_eq!(data["reorder_level"], 0);
        assert_eq!(data["current_stock"], 0);
        assert_eq!(data["status"], "active");
    }

    #[tokio::test]
    async fn test_create_then_get_returns_submitted_values() {
        let app = app(Arc::new(MemoryStore::new()));
        let submitted = json!({
            "sku": "WASHER-10",
            "product_name": "Washer",
            "category_id": 3,
            "description": "Zinc plated",
            "unit": "box",
            "purchase_price": 1.25,
            "selling_price": 2.5,
            "reorder_level": 20,
            "current_stock": 140,
            "status": "inactive"
        });
        let id = create(&app, submitted.clone()).await;

        let (status, body) = send(&app, "GET", &format!("/api/products/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        for (key, value) in submitted.as_object().unwrap() {
            assert_eq!(&body["data"][key], value, "{key}");
        }
    }

    #[tokio::test]
    async fn test_partial_update_leaves_other_fields() {
        let store = Arc::new(MemoryStore::new());
        let app = app(store.clone());
        let id = create(
            &app,
            json!({ "sku": "PIN-4", "product_name": "Pin", "current_stock": 5, "unit": "pc" }),
        )
        .await;
        let before = store.product(id).unwrap();

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/products/{id}"),
            Some(json!({ "current_stock": 12, "product_id": 77, "bogus": true })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["affectedRows"], 1);
        assert_eq!(body["data"]["current_stock"], 12);

        let after = store.product(id).unwrap();
        for (key, value) in &before {
            if key != "current_stock" {
                assert_eq!(&after[key], value, "{key}");
            }
        }
        assert!(after.get("bogus").is_none());
    }

    #[tokio::test]
    async fn test_update_without_whitelisted_fields_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let app = app(store.clone());
        let id = create(&app, json!({ "sku": "CLIP-2", "product_name": "Clip" })).await;
        let before = store.product(id).unwrap();

        for body in [json!({ "product_id": 9, "created_at": "now" }), json!({})] {
            let (status, response) =
                send(&app, "PUT", &format!("/api/products/{id}"), Some(body)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response["error"], "No valid fields to update");
        }

        let (status, _) = send(&app, "PUT", &format!("/api/products/{id}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(store.product(id).unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_404() {
        let app = app(Arc::new(MemoryStore::new()));

        let (status, body) = send(
            &app,
            "PUT",
            "/api/products/41",
            Some(json!({ "status": "inactive" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found");
    }

    #[tokio::test]
    async fn test_create_read_back_of_vanished_row_is_404() {
        let store = Arc::new(MemoryStore::new());
        store.vanish_after_insert();
        let app = app(store);

        let (status, body) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({ "sku": "GONE-1", "product_name": "Gone" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "success": false, "error": "Product not found" }));
    }

    #[tokio::test]
    async fn test_form_encoded_create_and_update() {
        let store = Arc::new(MemoryStore::new());
        let app = app(store.clone());

        let (status, body) = send_form(
            &app,
            "POST",
            "/api/products",
            "sku=FORM-1&product_name=Form+Bolt&unit=&status=",
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let data = &body["data"];
        assert_eq!(data["sku"], "FORM-1");
        assert_eq!(data["product_name"], "Form Bolt");
        assert_eq!(data["unit"], Value::Null);
        assert_eq!(data["current_stock"], 0);
        assert_eq!(data["status"], "active");

        let id = data["product_id"].as_u64().unwrap();
        let (status, body) = send_form(
            &app,
            "PUT",
            &format!("/api/products/{id}"),
            "current_stock=7&product_id=99",
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["affectedRows"], 1);
        assert_eq!(store.product(id).unwrap()["current_stock"], "7");
        assert_eq!(store.product(id).unwrap()["product_id"], id);
    }

    #[tokio::test]
    async fn test_non_object_body_is_400() {
        let app = app(Arc::new(MemoryStore::new()));

        let (status, body) = send(&app, "POST", "/api/products", Some(json!([1, 2]))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let app = app(Arc::new(MemoryStore::new()));
        let id = create(&app, json!({ "sku": "RIVET-3", "product_name": "Rivet" })).await;

        let (status, body) = send(&app, "DELETE", &format!("/api/products/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "affectedRows": 1 }));

        let (status, body) = send(&app, "DELETE", "/api/products/999", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "affectedRows": 0 }));

        let (status, _) = send(&app, "DELETE", "/api/products/-1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_products_ordered_with_category_name() {
        let store = Arc::new(MemoryStore::new());
        store.seed_table(
            "categories",
            vec![record(json!({ "category_id": 1, "category_name": "Fasteners" }))],
        );
        let app = app(store);
        create(&app, json!({ "sku": "B", "product_name": "Screw", "category_id": 1 })).await;
        create(&app, json!({ "sku": "A", "product_name": "Anchor" })).await;

        let (status, body) = send(&app, "GET", "/api/products", None).await;

        assert_eq!(status, StatusCode::OK);
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["product_name"], "Anchor");
        assert_eq!(rows[0]["category_name"], Value::Null);
        assert_eq!(rows[1]["category_name"], "Fasteners");
    }

    #[tokio::test]
    async fn test_table_listing_runs_capped_sql() {
        let store = Arc::new(MemoryStore::new());
        let rows = (0..3)
            .map(|i| record(json!({ "log_id": i, "action": "login" })))
            .collect();
        store.seed_table("activity_logs", rows);
        let app = app(store.clone());

        let (status, body) = send(&app, "GET", "/api/activity_logs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
        assert_eq!(
            store.listing_sql(),
            vec!["SELECT * FROM `activity_logs` LIMIT 1000".to_string()]
        );

        let (status, body) = send(&app, "GET", "/api/stocktake_details", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));

        let (status, _) = send(&app, "GET", "/api/secrets", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_errors_surface_verbatim() {
        let store = Arc::new(MemoryStore::new());
        let app = app(store.clone());
        create(&app, json!({ "sku": "DUP-1", "product_name": "First" })).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({ "sku": "DUP-1", "product_name": "Second" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "success": false, "error": "Duplicate entry 'DUP-1' for key 'sku'" })
        );

        store.fail_with("Table 'warehouse_db.users' doesn't exist");
        let (status, body) = send(&app, "GET", "/api/users", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Table 'warehouse_db.users' doesn't exist");
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        assert!(cors_layer("http://localhost:3000").is_ok());
        assert!(cors_layer("bad\norigin").is_err());
    }
}
