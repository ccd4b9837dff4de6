//! # Validation Module
//!
//! Input validation for catalog and investment forms.
//!
//! ## Validation Strategy
//! ```text
//!   Layer 1: CLI / form parsing (types, number parsing)
//!   Layer 2: THIS MODULE (business rule validation)
//!   Layer 3: Database (NOT NULL and CHECK constraints)
//! ```
//!
//! Discount percentages are deliberately absent here: out-of-range rates
//! are clamped by [`crate::types::DiscountRate::from_percent`], not
//! rejected.

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_CODE_LEN, MAX_LOOKUP_LEN, MAX_NAME_LEN, MAX_STOCK_QTY};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name: non-empty, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "name".to_string() });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an optional identifying code (SKU, serial number, barcode).
///
/// Codes are free text; only length is checked. Returns the trimmed code,
/// or `None` when the input is empty.
pub fn validate_code(field: &str, code: &str) -> ValidationResult<Option<String>> {
    let code = code.trim();

    if code.is_empty() {
        return Ok(None);
    }

    if code.len() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_CODE_LEN,
        });
    }

    Ok(Some(code.to_string()))
}

/// Validates a lookup query: at most 100 characters. Returns the trimmed
/// query (empty is allowed and matches nothing).
pub fn validate_lookup_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > MAX_LOOKUP_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_LOOKUP_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a selling price in cents: must be positive.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive { field: "price".to_string() });
    }

    Ok(())
}

/// Validates an optional purchase price in cents: non-negative when given.
pub fn validate_purchase_price_cents(cents: Option<i64>) -> ValidationResult<()> {
    if let Some(cents) = cents {
        if cents < 0 {
            return Err(ValidationError::MustNotBeNegative {
                field: "purchase price".to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a stock quantity: 0 to 1,000,000 units.
pub fn validate_stock_qty(qty: i64) -> ValidationResult<()> {
    if qty < 0 || qty > MAX_STOCK_QTY {
        return Err(ValidationError::OutOfRange {
            field: "stock quantity".to_string(),
            min: 0,
            max: MAX_STOCK_QTY,
        });
    }

    Ok(())
}

/// Validates an investment amount in cents: must be positive.
pub fn validate_investment_amount(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive { field: "amount".to_string() });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
