//! # Resource Store
//!
//! The seam between HTTP handlers and the database.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Handlers hold Arc<dyn ResourceStore>                                 │
//! │        │                                                                │
//! │        ├──► Database (MySQL)          production                       │
//! │        └──► in-memory store           router tests                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Methods are single statements. Read-after-write sequencing (create then
//! fetch, update then fetch) belongs to the caller.

use async_trait::async_trait;

use crate::error::DbResult;
use crate::pool::Database;
use warehouse_core::{NewProduct, PartialUpdate, Record, RecordId, TableListing};

/// Store operations used by the API.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Liveness probe (`SELECT 1`).
    async fn ping(&self) -> DbResult<()>;

    /// All products with their category name, ordered by product name.
    async fn list_products(&self) -> DbResult<Vec<Record>>;

    /// One product, or `None` when the id matches nothing.
    async fn get_product(&self, id: RecordId) -> DbResult<Option<Record>>;

    /// Inserts a product and returns the id the store assigned.
    async fn insert_product(&self, product: &NewProduct) -> DbResult<RecordId>;

    /// Applies a partial update and returns the affected row count.
    async fn update_product(&self, id: RecordId, update: &PartialUpdate) -> DbResult<u64>;

    /// Deletes a product and returns the affected row count.
    async fn delete_product(&self, id: RecordId) -> DbResult<u64>;

    /// Capped listing of an auxiliary table.
    async fn list_table(&self, listing: &TableListing) -> DbResult<Vec<Record>>;
}

#[async_trait]
impl ResourceStore for Database {
    async fn ping(&self) -> DbResult<()> {
        Database::ping(self).await
    }

    async fn list_products(&self) -> DbResult<Vec<Record>> {
        self.products().list().await
    }

    async fn get_product(&self, id: RecordId) -> DbResult<Option<Record>> {
        self.products().get_by_id(id).await
    }

    async fn insert_product(&self, product: &NewProduct) -> DbResult<RecordId> {
        self.products().insert(product).await
    }

    async fn update_product(&self, id: RecordId, update: &PartialUpdate) -> DbResult<u64> {
        self.products().update(id, update).await
    }

    async fn delete_product(&self, id: RecordId) -> DbResult<u64> {
        self.products().delete(id).await
    }

    async fn list_table(&self, listing: &TableListing) -> DbResult<Vec<Record>> {
        self.tables().list(listing).await
    }
}
