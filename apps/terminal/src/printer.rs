//! # File Receipt Printer
//!
//! Writes each invoice as a self-contained HTML file; opening it in a
//! browser pops the OS print dialog. This is the terminal's stand-in for
//! a receipt printer.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use dyqan_checkout::{invoice_html, ReceiptError, ReceiptPrinter};
use dyqan_core::CompletedSale;

/// Prints receipts as `<dir>/<invoice_no>.html`.
pub struct FileReceiptPrinter {
    dir: PathBuf,
}

impl FileReceiptPrinter {
    /// Creates a printer writing into `dir` (created on first print).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileReceiptPrinter { dir: dir.into() }
    }

    /// Path the receipt for `invoice_no` is written to.
    pub fn receipt_path(&self, invoice_no: &str) -> PathBuf {
        self.dir.join(format!("{invoice_no}.html"))
    }
}

impl ReceiptPrinter for FileReceiptPrinter {
    fn print(&self, sale: &CompletedSale) -> Result<(), ReceiptError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.receipt_path(&sale.sale.invoice_no);
        fs::write(&path, invoice_html(sale))?;

        info!(path = %path.display(), "Receipt written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dyqan_core::{Sale, SaleLine};

    #[test]
    fn test_writes_receipt_file() {
        let dir = std::env::temp_dir().join("dyqan-receipt-test");
        let _ = fs::remove_dir_all(&dir);

        let printer = FileReceiptPrinter::new(&dir);
        let now = Utc::now();
        let sale = CompletedSale {
            sale: Sale {
                id: "s1".into(),
                invoice_no: "INV-42".into(),
                total_cents: 1000,
                profit_total_cents: 400,
                created_at: now,
                day_key: "2026-01-31".into(),
                month_key: "2026-01".into(),
            },
            line: SaleLine {
                id: "l1".into(),
                sale_id: "s1".into(),
                product_id: "p1".into(),
                name_snapshot: "Widget".into(),
                sku_snapshot: None,
                barcode_snapshot: None,
                serial_snapshot: None,
                quantity: 1,
                unit_price_cents: 1000,
                unit_purchase_cents: 600,
                discount_bps: 0,
                line_total_cents: 1000,
                line_profit_cents: 400,
            },
        };

        printer.print(&sale).unwrap();

        let written = fs::read_to_string(printer.receipt_path("INV-42")).unwrap();
        assert!(written.contains("Widget"));

        let _ = fs::remove_dir_all(&dir);
    }
}
