//! # Input Normalization
//!
//! The credit-amount field on the checkout screen is free text. Users type
//! garbage, negative numbers, or amounts far beyond what they hold. None of
//! that is an error: the settlement calculator must always be callable, so
//! this module normalizes instead of failing.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "12.50"   ──► Money(12.50)                                             │
//! │  "-10"     ──► Money(0)       negative is meaningless here              │
//! │  "abc"     ──► Money(0)       unparsable contributes nothing            │
//! │  ""        ──► Money(0)                                                 │
//! │  "1e9"     ──► Money(0)       scientific notation not accepted;         │
//! │                               the clamp would cap it anyway             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Range checks that *should* reject (quantity spinners at the UI boundary)
//! live here too and return [`ValidationError`].

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Credit Input Normalization
// =============================================================================

/// Parses the free-text credit amount from the checkout form.
///
/// Unparsable or negative input normalizes to zero; the value is *not*
/// clamped against the balance or the amount due here - that is the
/// settlement calculator's job, so the "user typed garbage" concern stays
/// isolated from the settlement math.
pub fn parse_credit_input(raw: &str) -> Money {
    match Decimal::from_str(raw.trim()) {
        Ok(value) => normalize_credits(value),
        Err(_) => Money::zero(),
    }
}

/// Normalizes an already-numeric credit request: negatives become zero.
pub fn normalize_credits(value: Decimal) -> Money {
    Money::new(value).clamp_non_negative()
}

// =============================================================================
// Quantity Validation
// =============================================================================

/// Validates a quantity coming from the UI boundary.
///
/// ## Rules
/// - Must be positive (zero/negative quantities are expressed as removal,
///   never as a validated input)
/// - Must not exceed [`MAX_LINE_QUANTITY`]
pub fn validate_quantity(quantity: i64) -> ValidationResult<i64> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================
