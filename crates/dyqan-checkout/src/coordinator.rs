//! # Sale Coordinator
//!
//! Wraps a [`SaleStore`] with the two things that happen around the
//! atomic section: advisory pre-checks before it, best-effort receipt
//! printing after it.

use std::sync::Arc;

use tracing::{info, warn};

use crate::receipt::ReceiptPrinter;
use crate::store::SaleStore;
use dyqan_core::{CompletedSale, Product, SellError};

/// Executes one-unit sales against a store, with optional receipt output.
pub struct SellCoordinator<S: SaleStore> {
    store: S,
    printer: Option<Arc<dyn ReceiptPrinter>>,
}

impl<S: SaleStore> SellCoordinator<S> {
    /// Creates a coordinator with no receipt output.
    pub fn new(store: S) -> Self {
        SellCoordinator { store, printer: None }
    }

    /// Attaches a receipt printer, invoked after every committed sale.
    pub fn with_printer(mut self, printer: Arc<dyn ReceiptPrinter>) -> Self {
        self.printer = Some(printer);
        self
    }

    /// Sells one unit of the product the cashier is looking at.
    ///
    /// `snapshot` is the product as currently displayed; it may be stale
    /// by the time the store runs. The pre-checks here reject the
    /// obviously-unsellable cases cheaply, but the store re-checks
    /// everything against its own current state inside the atomic
    /// section — the advisory [`SellError::OutOfStock`] and the
    /// authoritative [`SellError::StockExhausted`] stay distinct signals.
    ///
    /// A printer failure is logged and swallowed: the sale has already
    /// committed, and a jammed printer must not roll back stock or
    /// ledger.
    pub async fn sell(&self, snapshot: &Product) -> Result<CompletedSale, SellError> {
        if !snapshot.active {
            return Err(SellError::InactiveProduct { id: snapshot.id.clone() });
        }
        if snapshot.stock_qty <= 0 {
            return Err(SellError::OutOfStock { id: snapshot.id.clone() });
        }

        let completed = self.store.sell_one(&snapshot.id).await?;

        info!(
            invoice_no = %completed.sale.invoice_no,
            product_id = %completed.line.product_id,
            total = %completed.sale.total(),
            "Unit sold"
        );

        if let Some(printer) = &self.printer {
            if let Err(err) = printer.print(&completed) {
                warn!(
                    invoice_no = %completed.sale.invoice_no,
                    error = %err,
                    "Receipt printing failed; sale is committed regardless"
                );
            }
        }

        Ok(completed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReceiptError;
    use crate::memory::MemorySaleStore;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn product(id: &str, active: bool, stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: id.into(),
            name: "Widget".into(),
            sku: None,
            serial_number: None,
            barcode: None,
            price_cents: 1000,
            purchase_price_cents: None,
            stock_qty: stock,
            discount_bps: 0,
            active,
            image_url: None,
            image_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Printer that counts calls and always fails.
    #[derive(Default)]
    struct JammedPrinter {
        calls: AtomicUsize,
    }

    impl ReceiptPrinter for JammedPrinter {
        fn print(&self, _sale: &CompletedSale) -> Result<(), ReceiptError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ReceiptError::Output("paper jam".into()))
        }
    }

    #[tokio::test]
    async fn test_advisory_checks_reject_before_store() {
        let store = MemorySaleStore::new();
        // Note: store is EMPTY; if the coordinator reached it, the errors
        // below would be ProductGone instead.
        let coordinator = SellCoordinator::new(store);

        let err = coordinator.sell(&product("p1", false, 5)).await.unwrap_err();
        assert!(matches!(err, SellError::InactiveProduct { .. }));

        let err = coordinator.sell(&product("p1", true, 0)).await.unwrap_err();
        assert!(matches!(err, SellError::OutOfStock { .. }));
    }

    #[tokio::test]
    async fn test_stale_snapshot_defers_to_store() {
        let store = MemorySaleStore::new();
        store.upsert_product(product("p1", true, 0)).await;
        let coordinator = SellCoordinator::new(store);

        // The cashier's screen still shows one unit; the store knows better
        let stale = product("p1", true, 1);
        let err = coordinator.sell(&stale).await.unwrap_err();
        assert!(matches!(err, SellError::StockExhausted { .. }));
    }

    #[tokio::test]
    async fn test_printer_failure_does_not_fail_sale() {
        let store = MemorySaleStore::new();
        store.upsert_product(product("p1", true, 3)).await;

        let printer = Arc::new(JammedPrinter::default());
        let coordinator = SellCoordinator::new(store).with_printer(printer.clone());

        let completed = coordinator.sell(&product("p1", true, 3)).await.unwrap();
        assert_eq!(completed.sale.total_cents, 1000);
        assert_eq!(printer.calls.load(Ordering::SeqCst), 1);
    }
}
