//! # Dashboard Analytics
//!
//! Read-side aggregation over the ledger, the investment log and the
//! catalog, as one pure fold:
//!
//! ```text
//!   snapshot (sales, investments, products) ──► aggregate() ──► DashboardStats
//! ```
//!
//! The fold has no access to any store; callers hand it a full snapshot
//! and recompute whenever the underlying data changes (the CLI simply
//! recomputes per request). Sales and investments carry their own
//! `month_key`, so scoping to a month is a filter, not a date calculation.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::pricing;
use crate::sale::month_key;
use crate::types::{Investment, Product, Sale};
use chrono::{DateTime, Utc};

/// Aggregated figures for the admin dashboard.
///
/// "all" fields cover the entire ledger; "month" fields cover the
/// selected month only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// The month the month-scoped fields refer to (`YYYY-MM`).
    pub month: String,

    pub total_sales_all_cents: i64,
    pub total_profit_all_cents: i64,
    pub count_sales_all: usize,

    pub total_sales_month_cents: i64,
    pub total_profit_month_cents: i64,
    pub count_sales_month: usize,

    pub total_invest_all_cents: i64,
    pub total_invest_month_cents: i64,

    /// Units on hand across the whole catalog.
    pub stock_units: i64,

    /// Value of all stock if every unit sold at its final (discounted)
    /// price today.
    pub stock_value_final_cents: i64,
}

impl DashboardStats {
    #[inline]
    pub fn total_sales_all(&self) -> Money {
        Money::from_cents(self.total_sales_all_cents)
    }

    #[inline]
    pub fn total_sales_month(&self) -> Money {
        Money::from_cents(self.total_sales_month_cents)
    }

    #[inline]
    pub fn total_profit_all(&self) -> Money {
        Money::from_cents(self.total_profit_all_cents)
    }

    #[inline]
    pub fn total_invest_all(&self) -> Money {
        Money::from_cents(self.total_invest_all_cents)
    }
}

/// Folds a full snapshot into dashboard figures for `month`.
///
/// Sale totals and profits are summed as stored; a product with no
/// purchase price already contributed zero cost at settlement time, so
/// nothing here needs to treat missing data specially. Stock value uses
/// the same pricing quote as the catalog and the sell path.
pub fn aggregate(
    sales: &[Sale],
    investments: &[Investment],
    products: &[Product],
    month: &str,
) -> DashboardStats {
    let total_sales_all_cents: i64 = sales.iter().map(|s| s.total_cents).sum();
    let total_profit_all_cents: i64 = sales.iter().map(|s| s.profit_total_cents).sum();

    let in_month = |key: &str| key == month;

    let total_sales_month_cents: i64 = sales
        .iter()
        .filter(|s| in_month(&s.month_key))
        .map(|s| s.total_cents)
        .sum();
    let total_profit_month_cents: i64 = sales
        .iter()
        .filter(|s| in_month(&s.month_key))
        .map(|s| s.profit_total_cents)
        .sum();
    let count_sales_month = sales.iter().filter(|s| in_month(&s.month_key)).count();

    let total_invest_all_cents: i64 = investments.iter().map(|i| i.amount_cents).sum();
    let total_invest_month_cents: i64 = investments
        .iter()
        .filter(|i| in_month(&i.month_key))
        .map(|i| i.amount_cents)
        .sum();

    let stock_units: i64 = products.iter().map(|p| p.stock_qty).sum();
    let stock_value_final_cents: i64 = products
        .iter()
        .map(|p| {
            let quote = pricing::quote(p.price(), p.discount_rate());
            quote.final_price.cents() * p.stock_qty
        })
        .sum();

    DashboardStats {
        month: month.to_string(),
        total_sales_all_cents,
        total_profit_all_cents,
        count_sales_all: sales.len(),
        total_sales_month_cents,
        total_profit_month_cents,
        count_sales_month,
        total_invest_all_cents,
        total_invest_month_cents,
        stock_units,
        stock_value_final_cents,
    }
}

/// Distinct month keys present in the data, newest first.
///
/// The current month is always included so the dashboard has a sensible
/// default selection even before the first sale of the month.
pub fn month_options(sales: &[Sale], investments: &[Investment], now: DateTime<Utc>) -> Vec<String> {
    let mut months: Vec<String> = sales
        .iter()
        .map(|s| s.month_key.clone())
        .chain(investments.iter().map(|i| i.month_key.clone()))
        .chain(std::iter::once(month_key(now)))
        .collect();

    months.sort_unstable_by(|a, b| b.cmp(a));
    months.dedup();
    months
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sale(month: &str, total_cents: i64, profit_cents: i64) -> Sale {
        Sale {
            id: format!("s-{month}-{total_cents}"),
            invoice_no: "INV-1".into(),
            total_cents,
            profit_total_cents: profit_cents,
            created_at: Utc::now(),
            day_key: format!("{month}-15"),
            month_key: month.into(),
        }
    }

    fn investment(month: &str, amount_cents: i64) -> Investment {
        Investment {
            id: format!("i-{month}-{amount_cents}"),
            amount_cents,
            note: None,
            created_at: Utc::now(),
            day_key: format!("{month}-02"),
            month_key: month.into(),
        }
    }

    fn product(price_cents: i64, discount_bps: u32, stock: i64) -> Product {
        Product {
            id: format!("p-{price_cents}-{stock}"),
            name: "P".into(),
            sku: None,
            serial_number: None,
            barcode: None,
            price_cents,
            purchase_price_cents: None,
            stock_qty: stock,
            discount_bps,
            active: true,
            image_url: None,
            image_path: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_month_and_all_time_sums() {
        let sales = vec![
            sale("2024-01", 1000, 400),
            sale("2024-01", 2050, 500),
            sale("2024-02", 500, 100),
        ];

        let stats = aggregate(&sales, &[], &[], "2024-01");
        assert_eq!(stats.total_sales_month_cents, 3050); // 10.00 + 20.50
        assert_eq!(stats.total_sales_all_cents, 3550); // + 5.00
        assert_eq!(stats.total_profit_month_cents, 900);
        assert_eq!(stats.count_sales_month, 2);
        assert_eq!(stats.count_sales_all, 3);
    }

    #[test]
    fn test_investment_sums() {
        let investments = vec![investment("2024-01", 120_000), investment("2024-03", 5000)];

        let stats = aggregate(&[], &investments, &[], "2024-01");
        assert_eq!(stats.total_invest_all_cents, 125_000);
        assert_eq!(stats.total_invest_month_cents, 120_000);
    }

    #[test]
    fn test_stock_value_uses_final_price() {
        let products = vec![
            product(1000, 0, 3),    // 3 × 10.00
            product(2000, 5000, 2), // 2 × 10.00 after 50% off
        ];

        let stats = aggregate(&[], &[], &products, "2024-01");
        assert_eq!(stats.stock_units, 5);
        assert_eq!(stats.stock_value_final_cents, 5000);
    }

    #[test]
    fn test_empty_snapshot() {
        let stats = aggregate(&[], &[], &[], "2024-01");
        assert_eq!(stats.total_sales_all_cents, 0);
        assert_eq!(stats.count_sales_all, 0);
        assert_eq!(stats.stock_units, 0);
    }

    #[test]
    fn test_month_options_sorted_desc_with_current() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let sales = vec![sale("2024-01", 100, 0), sale("2024-01", 200, 0)];
        let investments = vec![investment("2023-12", 100)];

        let options = month_options(&sales, &investments, now);
        assert_eq!(options, vec!["2024-03", "2024-01", "2023-12"]);
    }
}
