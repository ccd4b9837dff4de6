//! # The Sale Store Seam
//!
//! One trait, one method, one contract.

use async_trait::async_trait;

use dyqan_core::{CompletedSale, SellError};

/// The atomic decrement-and-append capability the coordinator runs on.
///
/// ## Contract
/// Implementations must execute, as ONE indivisible unit with
/// serializable isolation per product:
///
/// 1. Re-read the product's current state (the authoritative values; the
///    caller's snapshot is advisory only)
/// 2. Fail with [`SellError::ProductGone`] if the product no longer exists
/// 3. Fail with [`SellError::StockExhausted`] if current stock ≤ 0
/// 4. Decrement stock by exactly 1
/// 5. Settle the sale from the values read in step 1 (via
///    [`dyqan_core::sale::UnitSale::settle`], so every backend prices
///    identically)
/// 6. Append the immutable sale + line to the ledger
///
/// Either the decrement AND the append persist, or neither does. Two
/// concurrent calls for the same product must never both consume the same
/// unit of stock. Infrastructure failures surface as
/// [`SellError::StoreUnavailable`] and leave no side effects.
///
/// Not idempotent: every successful call consumes a unit. Retrying a
/// FAILED call is safe; retrying a successful one sells another unit.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Sells one unit of `product_id` under the contract above.
    async fn sell_one(&self, product_id: &str) -> Result<CompletedSale, SellError>;
}

/// Shared handles sell through the same store.
#[async_trait]
impl<T: SaleStore + ?Sized> SaleStore for std::sync::Arc<T> {
    async fn sell_one(&self, product_id: &str) -> Result<CompletedSale, SellError> {
        (**self).sell_one(product_id).await
    }
}
