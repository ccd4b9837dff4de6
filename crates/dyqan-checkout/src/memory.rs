//! # In-Memory Sale Store
//!
//! A [`SaleStore`] over a mutexed catalog and ledger, honoring the exact
//! contract of the SQLite store: per-product serializable isolation and
//! zero side effects on failure. Used by the test suite and handy as a
//! throwaway backend for demos.
//!
//! The store can be told to fail its next commits
//! ([`MemorySaleStore::set_fail_commits`]) to exercise the
//! abort-after-read path: the sale is fully settled, then dropped, and
//! the caller must observe unchanged stock and an unchanged ledger.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::store::SaleStore;
use dyqan_core::sale::UnitSale;
use dyqan_core::{CompletedSale, Product, SellError};

#[derive(Debug, Default)]
struct Inner {
    products: HashMap<String, Product>,
    ledger: Vec<CompletedSale>,
}

/// In-memory catalog + ledger with the atomic sale contract.
#[derive(Debug, Default)]
pub struct MemorySaleStore {
    inner: Mutex<Inner>,
    fail_commits: AtomicBool,
}

impl MemorySaleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a product.
    pub async fn upsert_product(&self, product: Product) {
        self.inner.lock().await.products.insert(product.id.clone(), product);
    }

    /// Removes a product (simulates a concurrent catalog delete).
    pub async fn remove_product(&self, id: &str) {
        self.inner.lock().await.products.remove(id);
    }

    /// Returns a product's current state.
    pub async fn product(&self, id: &str) -> Option<Product> {
        self.inner.lock().await.products.get(id).cloned()
    }

    /// Returns a copy of the ledger, oldest first.
    pub async fn ledger(&self) -> Vec<CompletedSale> {
        self.inner.lock().await.ledger.clone()
    }

    /// When set, subsequent commits abort after the read and the
    /// settlement but before anything is written.
    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SaleStore for MemorySaleStore {
    async fn sell_one(&self, product_id: &str) -> Result<CompletedSale, SellError> {
        // The lock is the transaction: held across read, settle and write,
        // so concurrent sellers serialize exactly like writers on the
        // database's write lock.
        let mut inner = self.inner.lock().await;

        let product = match inner.products.get(product_id) {
            Some(p) => p.clone(),
            None => return Err(SellError::ProductGone { id: product_id.to_string() }),
        };

        if product.stock_qty <= 0 {
            return Err(SellError::StockExhausted { id: product_id.to_string() });
        }

        let completed = UnitSale::settle(&product, Utc::now())
            .into_completed(Uuid::new_v4().to_string(), Uuid::new_v4().to_string());

        // Injected abort: everything above happened, nothing below may.
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(SellError::StoreUnavailable("commit aborted".to_string()));
        }

        match inner.products.get_mut(product_id) {
            Some(entry) => {
                entry.stock_qty -= 1;
                entry.updated_at = completed.sale.created_at;
            }
            // Unreachable while the lock is held; kept as a hard failure
            // rather than a panic.
            None => return Err(SellError::ProductGone { id: product_id.to_string() }),
        }
        inner.ledger.push(completed.clone());

        Ok(completed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
