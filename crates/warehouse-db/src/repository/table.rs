//! # Auxiliary Table Repository
//!
//! Read-only, capped listings of the tables declared in
//! [`warehouse_core::tables::AUXILIARY_TABLES`].

use sqlx::mysql::MySqlPool;
use tracing::debug;

use crate::error::DbResult;
use crate::value::rows_to_records;
use warehouse_core::{Record, TableListing};

/// Repository for auxiliary table listings.
#[derive(Debug, Clone)]
pub struct TableRepository {
    pool: MySqlPool,
}

impl TableRepository {
    /// Creates a new TableRepository.
    pub fn new(pool: MySqlPool) -> Self {
        TableRepository { pool }
    }

    /// Runs the listing's pre-rendered `SELECT * ... LIMIT 1000`.
    ///
    /// Rows past the cap are dropped by MySQL; nothing signals truncation.
    pub async fn list(&self, listing: &TableListing) -> DbResult<Vec<Record>> {
        let rows = sqlx::query(listing.sql()).fetch_all(&self.pool).await?;

        debug!(table = listing.name(), count = rows.len(), "Listed table");
        rows_to_records(&rows)
    }
}
