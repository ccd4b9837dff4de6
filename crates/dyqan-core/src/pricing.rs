//! # Pricing Calculator
//!
//! The one place discounts are turned into prices.
//!
//! ## The Rounding Funnel
//! ```text
//!   catalog screen ──┐
//!                    ├──► quote(price, rate) ──► { discount, final price }
//!   sale settlement ─┘
//! ```
//! The catalog display and the sale settlement call the same function, so
//! the price the cashier sees is the price the ledger records — to the
//! cent, always.
//!
//! ## Rounding Policy
//! Round to 2 decimals, half away from zero, done once in integer math:
//! `(cents × bps + 5000) / 10000`. Amounts here are never negative, so
//! this is plain half-up rounding. No other code rounds currency.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::DiscountRate;

/// The result of applying a discount rate to a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Amount taken off the base price.
    pub discount: Money,
    /// Price actually charged per unit.
    pub final_price: Money,
}

/// Computes the discount amount and final unit price for a base price.
///
/// `discount = round2(price × rate / 100)`, `final = price − discount`.
/// A zero rate quotes the base price unchanged.
///
/// ## Example
/// ```rust
/// use dyqan_core::money::Money;
/// use dyqan_core::pricing::quote;
/// use dyqan_core::types::DiscountRate;
///
/// let q = quote(Money::from_cents(1999), DiscountRate::from_percent(33.0));
/// assert_eq!(q.discount.cents(), 660);     // 19.99 × 0.33 = 6.5967 → 6.60
/// assert_eq!(q.final_price.cents(), 1339); // 19.99 − 6.60  = 13.39
/// ```
pub fn quote(price: Money, rate: DiscountRate) -> PriceQuote {
    // i128 so large prices cannot overflow the intermediate product
    let discount_cents = (price.cents() as i128 * rate.bps() as i128 + 5000) / 10_000;
    let discount = Money::from_cents(discount_cents as i64);

    PriceQuote {
        discount,
        final_price: price - discount,
    }
}

/// Profit earned on one unit: final price minus purchase cost.
///
/// Both inputs are already whole cents, so no rounding is involved; the
/// result is negative when a unit sells below cost.
#[inline]
pub fn unit_profit(final_price: Money, purchase_price: Money) -> Money {
    final_price - purchase_price
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(p: f64) -> DiscountRate {
        DiscountRate::from_percent(p)
    }

    #[test]
    fn test_round_percentages() {
        // €100.00 at 15% → €15.00 off, €85.00 final
        let q = quote(Money::from_cents(10_000), pct(15.0));
        assert_eq!(q.discount.cents(), 1500);
        assert_eq!(q.final_price.cents(), 8500);
    }

    #[test]
    fn test_rounding_half_up() {
        // €19.99 at 33% → 6.5967 rounds to €6.60, final €13.39
        let q = quote(Money::from_cents(1999), pct(33.0));
        assert_eq!(q.discount.cents(), 660);
        assert_eq!(q.final_price.cents(), 1339);

        // €0.10 at 25% → 0.025 rounds up to €0.03
        let q = quote(Money::from_cents(10), pct(25.0));
        assert_eq!(q.discount.cents(), 3);
        assert_eq!(q.final_price.cents(), 7);
    }

    #[test]
    fn test_zero_rate_is_identity() {
        let q = quote(Money::from_cents(1999), pct(0.0));
        assert_eq!(q.discount.cents(), 0);
        assert_eq!(q.final_price.cents(), 1999);
    }

    #[test]
    fn test_full_discount() {
        let q = quote(Money::from_cents(1999), pct(100.0));
        assert_eq!(q.discount.cents(), 1999);
        assert_eq!(q.final_price.cents(), 0);
    }

    #[test]
    fn test_clamped_rates_match_boundary() {
        // Above 100% behaves exactly like 100%
        let over = quote(Money::from_cents(1999), pct(130.0));
        let max = quote(Money::from_cents(1999), pct(100.0));
        assert_eq!(over, max);

        // Below 0% behaves exactly like 0%
        let under = quote(Money::from_cents(1999), pct(-5.0));
        let zero = quote(Money::from_cents(1999), pct(0.0));
        assert_eq!(under, zero);
    }

    #[test]
    fn test_fractional_percent() {
        // €10.00 at 12.5% → €1.25 off
        let q = quote(Money::from_cents(1000), pct(12.5));
        assert_eq!(q.discount.cents(), 125);
        assert_eq!(q.final_price.cents(), 875);
    }

    #[test]
    fn test_unit_profit() {
        // price 50, no discount, cost 30 → profit 20.00
        let q = quote(Money::from_cents(5000), pct(0.0));
        assert_eq!(unit_profit(q.final_price, Money::from_cents(3000)).cents(), 2000);

        // price 50, 20% discount → final 40, cost 30 → profit 10.00
        let q = quote(Money::from_cents(5000), pct(20.0));
        assert_eq!(q.final_price.cents(), 4000);
        assert_eq!(unit_profit(q.final_price, Money::from_cents(3000)).cents(), 1000);
    }

    #[test]
    fn test_profit_can_go_negative() {
        let q = quote(Money::from_cents(1000), pct(50.0));
        assert_eq!(unit_profit(q.final_price, Money::from_cents(800)).cents(), -300);
    }

    #[test]
    fn test_large_price_no_overflow() {
        let q = quote(Money::from_cents(i64::MAX / 2), pct(50.0));
        assert!(q.discount.cents() > 0);
    }
}
