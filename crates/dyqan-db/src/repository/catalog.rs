//! # Catalog Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD for the catalog management screen
//! - Lookup over barcode / serial number / SKU / name for the sales screen
//!
//! Stock is written here only through catalog edits (`update`), which is a
//! trust boundary, not a guarantee: the sale path owns the guarded
//! decrement in [`crate::repository::ledger::LedgerRepository`].

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dyqan_core::Product;

/// All product columns, in the order the row structs expect.
const PRODUCT_COLUMNS: &str = "id, name, sku, serial_number, barcode, price_cents, \
     purchase_price_cents, stock_qty, discount_bps, active, image_url, image_path, \
     created_at, updated_at";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists all products, newest first.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Looks up products by barcode, serial number, SKU or name.
    ///
    /// Case-insensitive substring match, newest first. An empty query
    /// matches nothing (the sales screen shows no results until the
    /// cashier types or scans something).
    pub async fn lookup(&self, query: &str) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, "Catalog lookup");

        if query.is_empty() {
            return Ok(Vec::new());
        }

        // Escape LIKE wildcards so a literal "%" in a barcode stays literal
        let escaped = query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
        let pattern = format!("%{escaped}%");

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE barcode LIKE ?1 ESCAPE '\\' \
                OR serial_number LIKE ?1 ESCAPE '\\' \
                OR sku LIKE ?1 ESCAPE '\\' \
                OR name LIKE ?1 ESCAPE '\\' \
             ORDER BY created_at DESC"
        ))
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Lookup returned products");
        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// ## Arguments
    /// * `product` - Product to insert (ID generated beforehand via
    ///   [`generate_product_id`])
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            "INSERT INTO products ( \
                 id, name, sku, serial_number, barcode, price_cents, \
                 purchase_price_cents, stock_qty, discount_bps, active, \
                 image_url, image_path, created_at, updated_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.sku)
        .bind(&product.serial_number)
        .bind(&product.barcode)
        .bind(product.price_cents)
        .bind(product.purchase_price_cents)
        .bind(product.stock_qty)
        .bind(product.discount_bps)
        .bind(product.active)
        .bind(&product.image_url)
        .bind(&product.image_path)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product (all editable fields).
    ///
    /// `created_at` never changes; `updated_at` is stamped here.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE products SET \
                 name = ?2, sku = ?3, serial_number = ?4, barcode = ?5, \
                 price_cents = ?6, purchase_price_cents = ?7, stock_qty = ?8, \
                 discount_bps = ?9, active = ?10, image_url = ?11, \
                 image_path = ?12, updated_at = ?13 \
             WHERE id = ?1",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.sku)
        .bind(&product.serial_number)
        .bind(&product.barcode)
        .bind(product.price_cents)
        .bind(product.purchase_price_cents)
        .bind(product.stock_qty)
        .bind(product.discount_bps)
        .bind(product.active)
        .bind(&product.image_url)
        .bind(&product.image_path)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Flips the active flag without touching anything else.
    pub async fn set_active(&self, id: &str, active: bool) -> DbResult<()> {
        debug!(id = %id, active = %active, "Setting product active flag");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE products SET active = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product from the catalog.
    ///
    /// Historical sales keep their frozen snapshots, so nothing in the
    /// ledger dangles; the product simply stops being sellable or
    /// editable.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products in the catalog (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn sample(id: &str, name: &str, barcode: Option<&str>) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            name: name.to_string(),
            sku: Some("SKU-1".into()),
            serial_number: None,
            barcode: barcode.map(String::from),
            price_cents: 1999,
            purchase_price_cents: Some(1200),
            stock_qty: 10,
            discount_bps: 0,
            active: true,
            image_url: None,
            image_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        repo.insert(&sample("p1", "Coca-Cola 330ml", Some("5449000000996")))
            .await
            .unwrap();

        let found = repo.get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(found.name, "Coca-Cola 330ml");
        assert_eq!(found.price_cents, 1999);
        assert_eq!(found.stock_qty, 10);
        assert!(found.active);

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_matches_codes_and_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        repo.insert(&sample("p1", "Coca-Cola 330ml", Some("5449000000996")))
            .await
            .unwrap();
        repo.insert(&sample("p2", "Pepsi 330ml", Some("1234567890123")))
            .await
            .unwrap();

        // by barcode fragment
        let hits = repo.lookup("544900").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");

        // by name, case-insensitive
        let hits = repo.lookup("pepsi").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p2");

        // by shared SKU
        let hits = repo.lookup("SKU-1").await.unwrap();
        assert_eq!(hits.len(), 2);

        // empty query matches nothing
        assert!(repo.lookup("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        let mut product = sample("p1", "Old name", None);
        repo.insert(&product).await.unwrap();

        product.name = "New name".into();
        product.price_cents = 2999;
        repo.update(&product).await.unwrap();

        let found = repo.get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(found.name, "New name");
        assert_eq!(found.price_cents, 2999);

        repo.delete("p1").await.unwrap();
        assert!(repo.get_by_id("p1").await.unwrap().is_none());

        assert!(matches!(
            repo.delete("p1").await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_set_active() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        repo.insert(&sample("p1", "Switchable", None)).await.unwrap();
        repo.set_active("p1", false).await.unwrap();

        let found = repo.get_by_id("p1").await.unwrap().unwrap();
        assert!(!found.active);
    }

    #[tokio::test]
    async fn test_count() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.insert(&sample("p1", "A", None)).await.unwrap();
        repo.insert(&sample("p2", "B", None)).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
