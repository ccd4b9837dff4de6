//! # Checkout Error Types
//!
//! Only receipt output can fail in this crate on its own; everything on
//! the sell path itself uses [`dyqan_core::SellError`].

use thiserror::Error;

/// Receipt rendering/output failures.
///
/// These are reported separately from the sale and never escalate to a
/// sale failure.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Could not write the rendered receipt to its destination.
    #[error("Receipt output failed: {0}")]
    Output(String),

    /// I/O failure while writing the receipt.
    #[error("Receipt I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
