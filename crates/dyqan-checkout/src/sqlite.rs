//! # SQLite Sale Store
//!
//! Production [`SaleStore`] backed by the database layer. The actual
//! transaction lives in [`dyqan_db::LedgerRepository::record_unit_sale`];
//! this type binds it to the seam and stamps the commit time.

use async_trait::async_trait;
use chrono::Utc;

use crate::store::SaleStore;
use dyqan_core::{CompletedSale, SellError};
use dyqan_db::Database;

/// [`SaleStore`] over the SQLite ledger.
#[derive(Debug, Clone)]
pub struct SqliteSaleStore {
    db: Database,
}

impl SqliteSaleStore {
    /// Creates a store over an open database handle.
    pub fn new(db: Database) -> Self {
        SqliteSaleStore { db }
    }
}

#[async_trait]
impl SaleStore for SqliteSaleStore {
    async fn sell_one(&self, product_id: &str) -> Result<CompletedSale, SellError> {
        self.db.ledger().record_unit_sale(product_id, Utc::now()).await
    }
}
