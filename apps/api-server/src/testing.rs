//! In-memory [`ResourceStore`] for router tests.
//!
//! Mimics the MySQL behaviour the handlers depend on: AUTO_INCREMENT ids,
//! a unique `sku`, NOT NULL `sku`/`product_name` and the category join on
//! list. Table listings return the seeded rows as they are and record the
//! SQL they were handed; the row cap lives in that SQL.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use warehouse_core::{NewProduct, PartialUpdate, Record, RecordId, TableListing};
use warehouse_db::{DbError, DbResult, ResourceStore};

#[derive(Default)]
pub struct MemoryStore {
    products: Mutex<BTreeMap<u64, Record>>,
    next_id: Mutex<u64>,
    tables: Mutex<BTreeMap<String, Vec<Record>>>,
    failure: Mutex<Option<String>>,
    vanish_after_insert: AtomicBool,
    listing_sql: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail with the given message.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Inserted rows disappear at once, as if deleted by another request
    /// before the read-back.
    pub fn vanish_after_insert(&self) {
        self.vanish_after_insert.store(true, Ordering::SeqCst);
    }

    /// SQL text of every table listing run so far.
    pub fn listing_sql(&self) -> Vec<String> {
        self.listing_sql.lock().unwrap().clone()
    }

    pub fn seed_table(&self, name: &str, rows: Vec<Record>) {
        self.tables.lock().unwrap().insert(name.to_string(), rows);
    }

    pub fn product(&self, id: u64) -> Option<Record> {
        self.products.lock().unwrap().get(&id).cloned()
    }

    fn check(&self) -> DbResult<()> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(DbError::QueryFailed(message.clone())),
            None => Ok(()),
        }
    }

    fn category_name(&self, category_id: &Value) -> Value {
        self.tables
            .lock()
            .unwrap()
            .get("categories")
            .and_then(|rows| {
                rows.iter()
                    .find(|row| row.get("category_id") == Some(category_id))
            })
            .and_then(|row| row.get("category_name").cloned())
            .unwrap_or(Value::Null)
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn ping(&self) -> DbResult<()> {
        self.check()
    }

    async fn list_products(&self) -> DbResult<Vec<Record>> {
        self.check()?;

        let mut rows: Vec<Record> = self.products.lock().unwrap().values().cloned().collect();
        rows.sort_by(|a, b| {
            let name = |r: &Record| r["product_name"].as_str().unwrap_or_default().to_string();
            name(a).cmp(&name(b))
        });
        for row in &mut rows {
            let category = self.category_name(&row["category_id"]);
            row.insert("category_name".to_string(), category);
        }

        Ok(rows)
    }

    async fn get_product(&self, id: RecordId) -> DbResult<Option<Record>> {
        self.check()?;
        Ok(self.product(id.get()))
    }

    async fn insert_product(&self, product: &NewProduct) -> DbResult<RecordId> {
        self.check()?;

        for (column, value) in [("sku", &product.sku), ("product_name", &product.product_name)] {
            if value.is_null() {
                return Err(DbError::NotNullViolation {
                    message: format!("Column '{}' cannot be null", column),
                });
            }
        }

        let mut products = self.products.lock().unwrap();
        if products.values().any(|row| row["sku"] == product.sku) {
            return Err(DbError::UniqueViolation {
                message: format!(
                    "Duplicate entry '{}' for key 'sku'",
                    product.sku.as_str().unwrap_or_default()
                ),
            });
        }

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = *next_id;

        let mut row = Record::new();
        row.insert("product_id".to_string(), Value::from(id));
        for (column, value) in product.columns() {
            row.insert(column.to_string(), value.clone());
        }
        if !self.vanish_after_insert.load(Ordering::SeqCst) {
            products.insert(id, row);
        }

        Ok(RecordId::new(id))
    }

    async fn update_product(&self, id: RecordId, update: &PartialUpdate) -> DbResult<u64> {
        self.check()?;

        let mut products = self.products.lock().unwrap();
        let Some(row) = products.get_mut(&id.get()) else {
            return Ok(0);
        };
        for (column, value) in update.assignments() {
            row.insert(column.to_string(), value.clone());
        }

        Ok(1)
    }

    async fn delete_product(&self, id: RecordId) -> DbResult<u64> {
        self.check()?;
        Ok(self.products.lock().unwrap().remove(&id.get()).map_or(0, |_| 1))
    }

    async fn list_table(&self, listing: &TableListing) -> DbResult<Vec<Record>> {
        self.check()?;
        self.listing_sql.lock().unwrap().push(listing.sql().to_string());

        Ok(self
            .tables
            .lock()
            .unwrap()
            .get(listing.name())
            .cloned()
            .unwrap_or_default())
    }
}
