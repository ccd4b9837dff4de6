//! # dyqan-core: Pure Business Logic for Dyqan POS
//!
//! This crate is the heart of Dyqan POS. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//!   CLI / front end
//!        │
//!        ▼
//!   dyqan-checkout ──── sale transaction coordinator, receipts
//!        │
//!        ▼
//!   dyqan-core (THIS CRATE)
//!        money · pricing · types · sale settlement · analytics · validation
//!        NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS
//!        │
//!        ▼
//!   dyqan-db ────────── SQLite queries, migrations, repositories
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Investment, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - The discount calculator every price in the system funnels through
//! - [`sale`] - Pure settlement of a one-unit sale (the frozen ledger snapshot)
//! - [`analytics`] - Dashboard aggregation as a pure fold
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, always
//! 2. **No I/O**: database, network and file system access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), all rates basis points
//! 4. **Explicit Errors**: errors are typed enums, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod error;
pub mod money;
pub mod pricing;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{SellError, ValidationError};
pub use money::Money;
pub use pricing::PriceQuote;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of an identifying code (SKU, serial number, barcode).
pub const MAX_CODE_LEN: usize = 100;

/// Maximum stock quantity accepted on catalog input.
///
/// Prevents accidental over-entry (e.g. a barcode scanned into the
/// stock field).
pub const MAX_STOCK_QTY: i64 = 1_000_000;

/// Maximum length of a lookup query.
pub const MAX_LOOKUP_LEN: usize = 100;
