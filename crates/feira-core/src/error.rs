//! # Error Types
//!
//! Domain-specific error types for feira-core.
//!
//! ## Error Philosophy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart mutation and settlement math NEVER fail - they normalize or      │
//! │  clamp instead (a negative credit request becomes zero, a quantity     │
//! │  drop below one removes the line).                                     │
//! │                                                                         │
//! │  The only errors this crate produces are boundary errors:              │
//! │  ├── CoreError::EmptyCart  - building a submission from nothing        │
//! │  └── ValidationError       - UI-boundary input checks                  │
//! │                                                                         │
//! │  Collaborator failures (network, rejected QR) live in feira-scan.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A checkout was submitted with no line items.
    ///
    /// ## When This Occurs
    /// The pay button should be disabled for an empty cart, but the
    /// submission builder still refuses rather than sending a zero-total
    /// order to the backend.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for the UI boundary.
///
/// These never come out of cart or settlement operations; they exist for
/// callers that want to reject input before it reaches the (total)
/// normalizing operations.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
