//! # Domain Types
//!
//! Core domain types used throughout Dyqan POS.
//!
//! ## Type Hierarchy
//! ```text
//!   Product       catalog entry; mutable, owns the live stock count
//!   Sale          ledger entry; append-only, immutable once written
//!   SaleLine      frozen product snapshot inside a sale (quantity is always 1)
//!   Investment    operator-recorded stock purchase; append-only
//!   DiscountRate  percentage in basis points (1250 = 12.50%)
//! ```
//!
//! ## Snapshot Pattern
//! A `SaleLine` copies name, codes, prices and the applied discount out of
//! the product at the moment of sale. Catalog edits after that moment must
//! never change what the ledger says was sold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. Rates stay integers, so price math
/// never touches floating point: 1250 bps = 12.50%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Full discount (100%).
    pub const MAX_BPS: u32 = 10_000;

    /// Creates a rate from basis points, clamped to [0, 10000].
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > Self::MAX_BPS {
            DiscountRate(Self::MAX_BPS)
        } else {
            DiscountRate(bps)
        }
    }

    /// Creates a rate from a percentage.
    ///
    /// Out-of-range input is clamped into [0, 100] rather than rejected,
    /// and NaN or infinite input is treated as 0. Operators type these
    /// values by hand; a typo should degrade to the nearest sane rate,
    /// not block the form.
    ///
    /// ## Example
    /// ```rust
    /// use dyqan_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_percent(12.5).bps(), 1250);
    /// assert_eq!(DiscountRate::from_percent(150.0).bps(), 10_000);
    /// assert_eq!(DiscountRate::from_percent(-3.0).bps(), 0);
    /// assert_eq!(DiscountRate::from_percent(f64::NAN).bps(), 0);
    /// ```
    pub fn from_percent(pct: f64) -> Self {
        let pct = if pct.is_finite() { pct } else { 0.0 };
        let pct = pct.clamp(0.0, 100.0);
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate (no discount).
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4, store-assigned).
    pub id: String,

    /// Display name shown to the cashier and on the receipt.
    pub name: String,

    /// Stock Keeping Unit - optional business identifier.
    pub sku: Option<String>,

    /// Serial number, for serialized goods.
    pub serial_number: Option<String>,

    /// Barcode (EAN-13, UPC-A, ...).
    pub barcode: Option<String>,

    /// Selling price in cents, before discount.
    pub price_cents: i64,

    /// Purchase cost in cents; basis for profit calculation.
    pub purchase_price_cents: Option<i64>,

    /// Units on hand. Never negative; the sale path is the only writer
    /// allowed to decrement it.
    pub stock_qty: i64,

    /// Discount in basis points (1250 = 12.50%).
    pub discount_bps: u32,

    /// Whether the product can currently be sold.
    pub active: bool,

    /// Download URL of the product image, if one was uploaded.
    pub image_url: Option<String>,

    /// Storage path of the product image (kept so deletion can clean up).
    pub image_path: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the undiscounted price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the purchase cost as Money (zero when unknown).
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_cents(self.purchase_price_cents.unwrap_or(0))
    }

    /// Returns the discount rate.
    #[inline]
    pub fn discount_rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.discount_bps)
    }

    /// Checks whether one unit could be sold right now, based on this
    /// (possibly stale) view of the product.
    pub fn sellable(&self) -> bool {
        self.active && self.stock_qty > 0
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale in the ledger.
///
/// Sales are created exactly once by the sale transaction and never
/// mutated or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,

    /// Invoice number derived from the commit time (`INV-<millis>`).
    /// Caller-generated; not guaranteed unique under clock skew.
    pub invoice_no: String,

    /// Sum of line totals.
    pub total_cents: i64,

    /// Sum of line profits.
    pub profit_total_cents: i64,

    pub created_at: DateTime<Utc>,

    /// `YYYY-MM-DD` grouping key derived from `created_at`.
    pub day_key: String,

    /// `YYYY-MM` grouping key derived from `created_at`.
    pub month_key: String,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the sale profit as Money.
    #[inline]
    pub fn profit_total(&self) -> Money {
        Money::from_cents(self.profit_total_cents)
    }
}

// =============================================================================
// Sale Line
// =============================================================================

/// A line item in a sale.
///
/// Uses the snapshot pattern to freeze product data at time of sale.
/// Quantity is always 1 in this system; carts are not modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLine {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub name_snapshot: String,
    /// SKU at time of sale (frozen).
    pub sku_snapshot: Option<String>,
    /// Barcode at time of sale (frozen).
    pub barcode_snapshot: Option<String>,
    /// Serial number at time of sale (frozen).
    pub serial_snapshot: Option<String>,

    /// Units sold (always 1).
    pub quantity: i64,

    /// Unit price charged, after discount (frozen).
    pub unit_price_cents: i64,

    /// Unit purchase cost at time of sale (frozen, zero when unknown).
    pub unit_purchase_cents: i64,

    /// Discount applied, in basis points (frozen).
    pub discount_bps: u32,

    /// unit price × quantity.
    pub line_total_cents: i64,

    /// (unit price − unit purchase) × quantity.
    pub line_profit_cents: i64,
}

impl SaleLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

/// A committed sale together with its single line item, as returned by
/// the sell path and consumed by the receipt renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedSale {
    pub sale: Sale,
    pub line: SaleLine,
}

// =============================================================================
// Investment
// =============================================================================

/// An operator-recorded stock purchase ("bought goods for the shop").
///
/// Independent of the catalog and the ledger; only the dashboard reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Investment {
    pub id: String,

    /// Amount spent, in cents. Always positive.
    pub amount_cents: i64,

    /// Optional free-text note.
    pub note: Option<String>,

    pub created_at: DateTime<Utc>,
    pub day_key: String,
    pub month_key: String,
}

impl Investment {
    /// Returns the invested amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
