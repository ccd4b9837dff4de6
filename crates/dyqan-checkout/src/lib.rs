//! # dyqan-checkout: Sale Transaction Coordinator
//!
//! The sell path of Dyqan POS, from the cashier's tap to the committed
//! ledger row and the printed receipt.
//!
//! ## Flow
//! ```text
//!   SellCoordinator::sell(snapshot)
//!        │
//!        ├── advisory pre-checks (stale snapshot): inactive? out of stock?
//!        │
//!        ▼
//!   SaleStore::sell_one(product_id)      ← the atomic section
//!        │     re-read · guarded decrement · settle · append · commit
//!        ▼
//!   ReceiptPrinter::print(&completed)    ← post-commit, best-effort
//! ```
//!
//! The store seam exists so the coordinator can run against SQLite in
//! production and against [`memory::MemorySaleStore`] in tests; both
//! implementations honor the same contract: per-product serializable
//! isolation, and zero side effects on any failure.

pub mod coordinator;
pub mod error;
pub mod memory;
pub mod receipt;
pub mod sqlite;
pub mod store;

pub use coordinator::SellCoordinator;
pub use error::ReceiptError;
pub use memory::MemorySaleStore;
pub use receipt::{invoice_html, ReceiptPrinter};
pub use sqlite::SqliteSaleStore;
pub use store::SaleStore;
