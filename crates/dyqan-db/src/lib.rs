//! # dyqan-db: Database Layer for Dyqan POS
//!
//! SQLite persistence for the catalog, the sales ledger and the
//! investment log, using sqlx for async operations.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (catalog, ledger, investments)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dyqan_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("dyqan.db")).await?;
//! let products = db.catalog().list().await?;
//! let sale = db.ledger().record_unit_sale("product-id", Utc::now()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::catalog::CatalogRepository;
pub use repository::investment::InvestmentRepository;
pub use repository::ledger::LedgerRepository;
