//! # Unit Sale Settlement
//!
//! The pure half of the sell path: given the product row *as read inside
//! the store transaction* and the commit time, produce everything that
//! gets frozen into the ledger. Every store backend calls this same
//! function from inside its atomic section, so the numbers on the ledger
//! never depend on which backend committed the sale.
//!
//! The impure half (re-reading the row, guarding the stock decrement,
//! writing both records atomically) belongs to the store implementations.

use chrono::{DateTime, Utc};

use crate::money::Money;
use crate::pricing::{self, PriceQuote};
use crate::types::{CompletedSale, Product, Sale, SaleLine};

/// Formats the `YYYY-MM-DD` aggregation key for a timestamp.
#[inline]
pub fn day_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Formats the `YYYY-MM` aggregation key for a timestamp.
#[inline]
pub fn month_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m").to_string()
}

/// Derives the invoice number for a sale committed at `at`.
///
/// Format is `INV-<unix millis>`. Distinct sales on one terminal get
/// distinct numbers, but this is not globally unique: two terminals with
/// skewed clocks can collide. The sale `id` is the real identity; the
/// invoice number is what gets printed.
#[inline]
pub fn invoice_number(at: DateTime<Utc>) -> String {
    format!("INV-{}", at.timestamp_millis())
}

/// A fully priced one-unit sale, ready to be assigned IDs and persisted.
///
/// All fields are computed from the in-transaction product row; nothing
/// here may come from the UI snapshot the cashier was looking at.
#[derive(Debug, Clone)]
pub struct UnitSale {
    pub invoice_no: String,
    pub created_at: DateTime<Utc>,
    pub day_key: String,
    pub month_key: String,

    pub product_id: String,
    pub name_snapshot: String,
    pub sku_snapshot: Option<String>,
    pub barcode_snapshot: Option<String>,
    pub serial_snapshot: Option<String>,

    pub discount_bps: u32,
    pub unit_price: Money,
    pub unit_purchase: Money,
    pub total: Money,
    pub profit: Money,
}

impl UnitSale {
    /// Settles a one-unit sale of `product` at commit time `at`.
    ///
    /// The unit price comes from the pricing calculator applied to the
    /// product's current price and discount; profit is unit price minus
    /// purchase cost (zero cost when unknown). Quantity is always 1, so
    /// line total and line profit equal their unit values.
    pub fn settle(product: &Product, at: DateTime<Utc>) -> UnitSale {
        let PriceQuote { final_price, .. } = pricing::quote(product.price(), product.discount_rate());
        let unit_purchase = product.purchase_price();
        let profit = pricing::unit_profit(final_price, unit_purchase);

        UnitSale {
            invoice_no: invoice_number(at),
            created_at: at,
            day_key: day_key(at),
            month_key: month_key(at),
            product_id: product.id.clone(),
            name_snapshot: product.name.clone(),
            sku_snapshot: product.sku.clone(),
            barcode_snapshot: product.barcode.clone(),
            serial_snapshot: product.serial_number.clone(),
            discount_bps: product.discount_rate().bps(),
            unit_price: final_price,
            unit_purchase,
            total: final_price,
            profit,
        }
    }

    /// Materializes the settled sale with store-assigned IDs.
    pub fn into_completed(self, sale_id: String, line_id: String) -> CompletedSale {
        let sale = Sale {
            id: sale_id.clone(),
            invoice_no: self.invoice_no,
            total_cents: self.total.cents(),
            profit_total_cents: self.profit.cents(),
            created_at: self.created_at,
            day_key: self.day_key,
            month_key: self.month_key,
        };

        let line = SaleLine {
            id: line_id,
            sale_id,
            product_id: self.product_id,
            name_snapshot: self.name_snapshot,
            sku_snapshot: self.sku_snapshot,
            barcode_snapshot: self.barcode_snapshot,
            serial_snapshot: self.serial_snapshot,
            quantity: 1,
            unit_price_cents: self.unit_price.cents(),
            unit_purchase_cents: self.unit_purchase.cents(),
            discount_bps: self.discount_bps,
            line_total_cents: self.total.cents(),
            line_profit_cents: self.profit.cents(),
        };

        CompletedSale { sale, line }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product() -> Product {
        Product {
            id: "prod-1".into(),
            name: "Laptop Stand".into(),
            sku: Some("LS-01".into()),
            serial_number: None,
            barcode: Some("8600123456789".into()),
            price_cents: 5000,
            purchase_price_cents: Some(3000),
            stock_qty: 4,
            discount_bps: 2000, // 20%
            active: true,
            image_url: None,
            image_path: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 31, 14, 30, 5).unwrap()
    }

    #[test]
    fn test_keys_and_invoice_number() {
        let when = at();
        assert_eq!(day_key(when), "2026-01-31");
        assert_eq!(month_key(when), "2026-01");
        assert_eq!(invoice_number(when), format!("INV-{}", when.timestamp_millis()));
    }

    #[test]
    fn test_settle_prices_from_product() {
        // price 50.00, 20% off → unit 40.00, cost 30.00 → profit 10.00
        let sale = UnitSale::settle(&product(), at());
        assert_eq!(sale.unit_price.cents(), 4000);
        assert_eq!(sale.total.cents(), 4000);
        assert_eq!(sale.profit.cents(), 1000);
        assert_eq!(sale.discount_bps, 2000);
    }

    #[test]
    fn test_settle_without_purchase_price() {
        let mut p = product();
        p.purchase_price_cents = None;
        p.discount_bps = 0;

        let sale = UnitSale::settle(&p, at());
        assert_eq!(sale.unit_price.cents(), 5000);
        // unknown cost counts as zero, so the whole price is profit
        assert_eq!(sale.profit.cents(), 5000);
    }

    #[test]
    fn test_into_completed_freezes_snapshots() {
        let completed = UnitSale::settle(&product(), at()).into_completed("s1".into(), "l1".into());

        assert_eq!(completed.sale.id, "s1");
        assert_eq!(completed.sale.day_key, "2026-01-31");
        assert_eq!(completed.sale.month_key, "2026-01");
        assert_eq!(completed.sale.total_cents, 4000);
        assert_eq!(completed.sale.profit_total_cents, 1000);

        assert_eq!(completed.line.sale_id, "s1");
        assert_eq!(completed.line.product_id, "prod-1");
        assert_eq!(completed.line.name_snapshot, "Laptop Stand");
        assert_eq!(completed.line.sku_snapshot.as_deref(), Some("LS-01"));
        assert_eq!(completed.line.quantity, 1);
        assert_eq!(completed.line.line_total_cents, 4000);
        assert_eq!(completed.line.line_profit_cents, 1000);
    }
}
