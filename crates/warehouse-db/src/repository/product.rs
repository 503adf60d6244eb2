//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - List with category name, ordered by product name
//! - Get / delete by `product_id`
//! - Insert with defaults already applied by [`NewProduct`]
//! - Whitelisted partial update
//!
//! ## No Implicit Transactions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Each method is exactly one statement on one pooled connection.        │
//! │                                                                         │
//! │  Create:  insert()  ──► connection returned ──► get_by_id(new_id)      │
//! │  Update:  update()  ──► connection returned ──► get_by_id(id)          │
//! │                                                                         │
//! │  A DELETE from another request can land between the two calls; the    │
//! │  read-back then returns None and the caller reports "not found".       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::mysql::MySqlPool;
use tracing::debug;

use crate::error::DbResult;
use crate::value::{bind_all, row_to_record, rows_to_records};
use warehouse_core::{NewProduct, PartialUpdate, Record, RecordId};

/// Product table name.
pub const PRODUCTS_TABLE: &str = "products";

/// Product primary key column.
pub const PRODUCT_KEY_COLUMN: &str = "product_id";

const LIST_SQL: &str = r#"
    SELECT p.*, c.category_name
    FROM products p
    LEFT JOIN categories c ON p.category_id = c.category_id
    ORDER BY p.product_name ASC
"#;

const GET_BY_ID_SQL: &str = "SELECT * FROM products WHERE product_id = ? LIMIT 1";

const INSERT_SQL: &str = r#"
    INSERT INTO products (
        sku, product_name, category_id, description, unit,
        purchase_price, selling_price, reorder_level, current_stock, status
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

const DELETE_SQL: &str = "DELETE FROM products WHERE product_id = ?";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let all = repo.list().await?;
/// let one = repo.get_by_id(RecordId::new(7)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: MySqlPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: MySqlPool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product joined with its category name.
    ///
    /// No pagination: the caller receives the full table.
    pub async fn list(&self) -> DbResult<Vec<Record>> {
        let rows = sqlx::query(LIST_SQL).fetch_all(&self.pool).await?;

        debug!(count = rows.len(), "Listed products");
        rows_to_records(&rows)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Record))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: RecordId) -> DbResult<Option<Record>> {
        debug!(%id, "Fetching product");

        let row = sqlx::query(GET_BY_ID_SQL)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_record).transpose()
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(RecordId)` - id assigned by the store (AUTO_INCREMENT)
    /// * `Err(DbError::UniqueViolation)` - SKU already exists
    pub async fn insert(&self, product: &NewProduct) -> DbResult<RecordId> {
        debug!(sku = %product.sku, "Inserting product");

        let result = bind_all(sqlx::query(INSERT_SQL), product.values())
            .execute(&self.pool)
            .await?;

        let id = RecordId::new(result.last_insert_id());
        debug!(%id, "Product inserted");
        Ok(id)
    }

    /// Applies a whitelisted partial update.
    ///
    /// ## Returns
    /// * `Ok(n)` - rows affected; `0` when the id matches nothing
    pub async fn update(&self, id: RecordId, update: &PartialUpdate) -> DbResult<u64> {
        let sql = update.to_sql(PRODUCTS_TABLE, PRODUCT_KEY_COLUMN);
        debug!(%id, sql = %sql, "Updating product");

        let result = bind_all(sqlx::query(&sql), &update.bind_values(id))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes a product by id.
    ///
    /// ## Returns
    /// * `Ok(n)` - rows affected; `0` is not an error
    pub async fn delete(&self, id: RecordId) -> DbResult<u64> {
        debug!(%id, "Deleting product");

        let result = sqlx::query(DELETE_SQL)
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use warehouse_core::types::PRODUCT_INSERT_COLUMNS;
    use warehouse_core::whitelist::PRODUCT_UPDATE_FIELDS;

    #[test]
    fn test_insert_columns_match_bind_order() {
        let columns: Vec<&str> = INSERT_SQL
            .split('(')
            .nth(1)
            .and_then(|s| s.split(')').next())
            .unwrap()
            .split(',')
            .map(str::trim)
            .collect();

        assert_eq!(columns, PRODUCT_INSERT_COLUMNS.to_vec());
        assert_eq!(INSERT_SQL.matches('?').count(), PRODUCT_INSERT_COLUMNS.len());
    }

    #[test]
    fn test_update_statement_targets_primary_key() {
        let body = serde_json::json!({ "status": "inactive" });
        let update = PRODUCT_UPDATE_FIELDS
            .build_update(body.as_object().unwrap())
            .unwrap();

        assert_eq!(
            update.to_sql(PRODUCTS_TABLE, PRODUCT_KEY_COLUMN),
            "UPDATE products SET status = ? WHERE product_id = ?"
        );
    }

    #[test]
    fn test_list_joins_categories_and_orders_by_name() {
        assert!(LIST_SQL.contains("LEFT JOIN categories c ON p.category_id = c.category_id"));
        assert!(LIST_SQL.contains("ORDER BY p.product_name ASC"));
    }
}
