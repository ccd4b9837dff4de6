//! # Ledger Repository
//!
//! The append-only sales ledger, and the one write that matters: the
//! atomic unit sale.
//!
//! ## The Atomic Section
//! ```text
//!   BEGIN
//!     UPDATE products SET stock_qty = stock_qty - 1
//!       WHERE id = ?1 AND stock_qty > 0          ← guarded decrement FIRST
//!     │
//!     ├── 0 rows? → SELECT to tell ProductGone from StockExhausted, ROLLBACK
//!     │
//!     SELECT <product row>                        ← authoritative values
//!     settle (pure: price, profit, snapshots, keys)
//!     INSERT INTO sales ...
//!     INSERT INTO sale_lines ...
//!   COMMIT                                        ← both writes or neither
//! ```
//!
//! The guarded UPDATE is deliberately the FIRST statement: it takes
//! SQLite's write lock before anything is read, so the row the settlement
//! prices from can never be stale, and two terminals can never both
//! consume the same unit. A transaction that reads first would take a
//! snapshot it may be unable to upgrade when a concurrent seller commits.
//!
//! Ledger rows are never updated or deleted; every later price change in
//! the catalog leaves history untouched.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dyqan_core::sale::UnitSale;
use dyqan_core::{CompletedSale, Product, Sale, SaleLine, SellError};

/// All sale header columns.
const SALE_COLUMNS: &str =
    "id, invoice_no, total_cents, profit_total_cents, created_at, day_key, month_key";

/// All sale line columns.
const LINE_COLUMNS: &str = "id, sale_id, product_id, name_snapshot, sku_snapshot, \
     barcode_snapshot, serial_snapshot, quantity, unit_price_cents, unit_purchase_cents, \
     discount_bps, line_total_cents, line_profit_cents";

/// Repository for sales ledger operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Sells exactly one unit of `product_id` as one atomic operation:
    /// guarded stock decrement plus ledger append.
    ///
    /// ## Errors
    /// * [`SellError::ProductGone`] - the product vanished before commit
    /// * [`SellError::StockExhausted`] - a concurrent sale took the last
    ///   unit; the decrement found `stock_qty = 0`
    /// * [`SellError::StoreUnavailable`] - the transaction could not be
    ///   committed (infrastructure failure)
    ///
    /// On any error the transaction rolls back and nothing is persisted.
    pub async fn record_unit_sale(
        &self,
        product_id: &str,
        at: DateTime<Utc>,
    ) -> Result<CompletedSale, SellError> {
        debug!(product_id = %product_id, "Recording unit sale");

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        // Guarded decrement; write lock is held from here until commit.
        let decremented = sqlx::query(
            "UPDATE products SET stock_qty = stock_qty - 1, updated_at = ?2 \
             WHERE id = ?1 AND stock_qty > 0",
        )
        .bind(product_id)
        .bind(at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        if decremented.rows_affected() == 0 {
            let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = ?1")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_err)?;

            // Dropping the transaction rolls it back.
            return Err(match exists {
                None => SellError::ProductGone { id: product_id.to_string() },
                Some(_) => SellError::StockExhausted { id: product_id.to_string() },
            });
        }

        // Authoritative row, read under the write lock. The decrement only
        // touched stock_qty; price, discount and cost are what the sale
        // must be settled from, not whatever the cashier's screen showed.
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, sku, serial_number, barcode, price_cents, \
                    purchase_price_cents, stock_qty, discount_bps, active, \
                    image_url, image_path, created_at, updated_at \
             FROM products WHERE id = ?1",
        )
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        let completed = UnitSale::settle(&product, at)
            .into_completed(Uuid::new_v4().to_string(), Uuid::new_v4().to_string());

        insert_sale(&mut tx, &completed.sale).await.map_err(SellError::from)?;
        insert_line(&mut tx, &completed.line).await.map_err(SellError::from)?;

        tx.commit().await.map_err(db_err)?;

        info!(
            sale_id = %completed.sale.id,
            invoice_no = %completed.sale.invoice_no,
            product_id = %product_id,
            total = %completed.sale.total(),
            "Sale committed"
        );

        Ok(completed)
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets the line items for a sale.
    pub async fn lines(&self, sale_id: &str) -> DbResult<Vec<SaleLine>> {
        let lines = sqlx::query_as::<_, SaleLine>(&format!(
            "SELECT {LINE_COLUMNS} FROM sale_lines WHERE sale_id = ?1"
        ))
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Lists all sales, newest first.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists the sales of one month (`YYYY-MM`), newest first.
    pub async fn list_by_month(&self, month_key: &str) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE month_key = ?1 ORDER BY created_at DESC"
        ))
        .bind(month_key)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Counts ledger entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Maps an sqlx error straight to the sell taxonomy.
fn db_err(err: sqlx::Error) -> SellError {
    SellError::from(DbError::from(err))
}

async fn insert_sale(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    sale: &Sale,
) -> DbResult<()> {
    sqlx::query(
        "INSERT INTO sales ( \
             id, invoice_no, total_cents, profit_total_cents, created_at, day_key, month_key \
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(&sale.id)
    .bind(&sale.invoice_no)
    .bind(sale.total_cents)
    .bind(sale.profit_total_cents)
    .bind(sale.created_at)
    .bind(&sale.day_key)
    .bind(&sale.month_key)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_line(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    line: &SaleLine,
) -> DbResult<()> {
    sqlx::query(
        "INSERT INTO sale_lines ( \
             id, sale_id, product_id, name_snapshot, sku_snapshot, barcode_snapshot, \
             serial_snapshot, quantity, unit_price_cents, unit_purchase_cents, \
             discount_bps, line_total_cents, line_profit_cents \
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
    )
    .bind(&line.id)
    .bind(&line.sale_id)
    .bind(&line.product_id)
    .bind(&line.name_snapshot)
    .bind(&line.sku_snapshot)
    .bind(&line.barcode_snapshot)
    .bind(&line.serial_snapshot)
    .bind(line.quantity)
    .bind(line.unit_price_cents)
    .bind(line.unit_purchase_cents)
    .bind(line.discount_bps)
    .bind(line.line_total_cents)
    .bind(line.line_profit_cents)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::catalog::CatalogRepository;

    async fn setup() -> (Database, CatalogRepository, LedgerRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();
        let ledger = db.ledger();
        (db, catalog, ledger)
    }

    fn product(id: &str, price_cents: i64, discount_bps: u32, stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            name: "Widget".into(),
            sku: Some("W-1".into()),
            serial_number: None,
            barcode: Some("12345".into()),
            price_cents,
            purchase_price_cents: Some(3000),
            stock_qty: stock,
            discount_bps,
            active: true,
            image_url: None,
            image_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_unit_sale_decrements_and_appends() {
        let (_db, catalog, ledger) = setup().await;
        catalog.insert(&product("p1", 5000, 2000, 3)).await.unwrap();

        let completed = ledger.record_unit_sale("p1", Utc::now()).await.unwrap();

        // price 50.00 at 20% → 40.00, cost 30.00 → profit 10.00
        assert_eq!(completed.sale.total_cents, 4000);
        assert_eq!(completed.sale.profit_total_cents, 1000);
        assert_eq!(completed.line.quantity, 1);
        assert_eq!(completed.line.name_snapshot, "Widget");

        let after = catalog.get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(after.stock_qty, 2);
        assert_eq!(ledger.count().await.unwrap(), 1);

        let lines = ledger.lines(&completed.sale.id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].unit_price_cents, 4000);
    }

    #[tokio::test]
    async fn test_exhausted_stock_fails_without_side_effects() {
        let (_db, catalog, ledger) = setup().await;
        catalog.insert(&product("p1", 5000, 0, 0)).await.unwrap();

        let err = ledger.record_unit_sale("p1", Utc::now()).await.unwrap_err();
        assert!(matches!(err, SellError::StockExhausted { .. }));

        let after = catalog.get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(after.stock_qty, 0);
        assert_eq!(ledger.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_product_is_gone() {
        let (_db, _catalog, ledger) = setup().await;

        let err = ledger.record_unit_sale("ghost", Utc::now()).await.unwrap_err();
        assert!(matches!(err, SellError::ProductGone { .. }));
        assert_eq!(ledger.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sale_prices_from_current_row_not_caller() {
        let (_db, catalog, ledger) = setup().await;
        let mut p = product("p1", 5000, 1000, 5);
        catalog.insert(&p).await.unwrap();

        // Operator changes the discount after the cashier loaded the screen
        p.discount_bps = 5000;
        catalog.update(&p).await.unwrap();

        let completed = ledger.record_unit_sale("p1", Utc::now()).await.unwrap();
        // 50.00 at the NEW 50% discount → 25.00
        assert_eq!(completed.line.unit_price_cents, 2500);
    }

    #[tokio::test]
    async fn test_ledger_is_frozen_against_later_edits() {
        let (_db, catalog, ledger) = setup().await;
        let mut p = product("p1", 5000, 1000, 5);
        catalog.insert(&p).await.unwrap();

        // 50.00 at 10% → 45.00
        let completed = ledger.record_unit_sale("p1", Utc::now()).await.unwrap();
        assert_eq!(completed.line.unit_price_cents, 4500);

        p.price_cents = 10_000;
        catalog.update(&p).await.unwrap();

        let sale = ledger.get_by_id(&completed.sale.id).await.unwrap().unwrap();
        let lines = ledger.lines(&completed.sale.id).await.unwrap();
        assert_eq!(sale.total_cents, 4500);
        assert_eq!(lines[0].unit_price_cents, 4500);
    }

    #[tokio::test]
    async fn test_list_by_month() {
        let (_db, catalog, ledger) = setup().await;
        catalog.insert(&product("p1", 1000, 0, 10)).await.unwrap();

        let completed = ledger.record_unit_sale("p1", Utc::now()).await.unwrap();
        let month = completed.sale.month_key.clone();

        assert_eq!(ledger.list_by_month(&month).await.unwrap().len(), 1);
        assert!(ledger.list_by_month("1999-01").await.unwrap().is_empty());
        assert_eq!(ledger.list().await.unwrap().len(), 1);
    }
}
