//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The storefront shows a settlement preview that the backend             │
//! │  recomputes on submission. If the two drift by even a cent, a           │
//! │  customer is charged something other than what was displayed.           │
//! │                                                                         │
//! │  OUR SOLUTION: Exact Decimals                                           │
//! │    subtotal, fee and credits are carried at FULL precision;             │
//! │    rounding to two decimal places happens once, at display time         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use feira_core::money::Money;
//!
//! let price = Money::from_major_minor(10, 99); // R$ 10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                         // R$ 21.98
//! let total = price + Money::from_major_minor(5, 0); // R$ 15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_f64(10.99); // NO SUCH METHOD EXISTS!
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::FeeRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value with exact decimal arithmetic.
///
/// ## Design Decisions
/// - **`rust_decimal::Decimal`**: Exact base-10 arithmetic; `10% of 12.34`
///   is `1.234`, not `1.2340000000000002`
/// - **Signed**: Negative values exist transiently (credit deltas); the
///   settlement calculator clamps them out of externally visible results
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **Serialized as a string**: `"10.99"` on the wire, so the TypeScript
///   frontend never pushes the value through an IEEE double
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartLine.unit_price ──► CartLine.line_total
///                                                 │
///                                                 ▼
/// Cart.subtotal ──► platform fee ──► credit clamp ──► Settlement.total
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(transparent)]
pub struct Money(#[ts(as = "String")] Decimal);

impl Money {
    /// Creates a Money value from a raw decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from major and minor units (reais and centavos).
    ///
    /// ## Example
    /// ```rust
    /// use feira_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // R$ 10.99
    ///
    /// let refund = Money::from_major_minor(-5, 50); // -R$ 5.50
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -R$ 5.50, not -R$ 4.50
    pub fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        let centavos = if major < 0 {
            major * 100 - minor
        } else {
            major * 100 + minor
        };
        Money(Decimal::new(centavos, 2))
    }

    /// Returns the underlying full-precision amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to two decimal places for display.
    ///
    /// ## Rounding Policy
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  DISPLAY ROUNDING ONLY                                              │
    /// │                                                                     │
    /// │  Internal composition (subtotal + fee - credits) always uses the    │
    /// │  unrounded values. Rounding each intermediate and then composing    │
    /// │  compounds error; rounding once at the end cannot move the total    │
    /// │  by more than half a display unit.                                  │
    /// │                                                                     │
    /// │  Midpoints round half-to-even (banker's rounding), so repeated      │
    /// │  display of .005 values carries no systematic bias.                 │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    #[inline]
    pub fn rounded(&self) -> Self {
        Money(self.0.round_dp(2))
    }

    /// Applies a percentage rate and returns the full-precision result.
    ///
    /// ## Example
    /// ```rust
    /// use feira_core::money::Money;
    /// use feira_core::types::FeeRate;
    ///
    /// let subtotal = Money::from_major_minor(50, 0);
    /// let fee = subtotal.apply_rate(FeeRate::from_bps(1000)); // 10%
    /// assert_eq!(fee, Money::from_major_minor(5, 0));
    /// ```
    pub fn apply_rate(&self, rate: FeeRate) -> Money {
        Money(self.0 * rate.as_decimal())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use feira_core::money::Money;
    ///
    /// let unit_price = Money::from_major_minor(2, 99);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total, Money::from_major_minor(8, 97));
    /// ```
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Clamps negative values to zero.
    ///
    /// Used by the settlement calculator so a credit over-application can
    /// never surface as a negative amount due.
    #[inline]
    pub fn clamp_non_negative(&self) -> Self {
        if self.is_negative() {
            Money::zero()
        } else {
            *self
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for receipts and debugging. The frontend formats for locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.0.round_dp(2);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            write!(f, "-R$ {:.2}", -rounded)
        } else {
            write!(f, "R$ {:.2}", rounded)
        }
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.amount(), dec!(10.99));

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.amount(), dec!(-5.50));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_major_minor(10, 99)), "R$ 10.99");
        assert_eq!(format!("{}", Money::from_major_minor(5, 0)), "R$ 5.00");
        assert_eq!(format!("{}", Money::from_major_minor(-5, 50)), "-R$ 5.50");
        assert_eq!(format!("{}", Money::zero()), "R$ 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major_minor(10, 0);
        let b = Money::from_major_minor(5, 0);

        assert_eq!(a + b, Money::from_major_minor(15, 0));
        assert_eq!(a - b, Money::from_major_minor(5, 0));
        assert_eq!(a * 3, Money::from_major_minor(30, 0));
    }

    #[test]
    fn test_apply_rate_keeps_full_precision() {
        // 10% of R$ 12.34 = R$ 1.234 - NOT rounded until display
        let subtotal = Money::from_major_minor(12, 34);
        let fee = subtotal.apply_rate(FeeRate::from_bps(1000));
        assert_eq!(fee.amount(), dec!(1.234));

        // Display rounding happens separately
        assert_eq!(fee.rounded().amount(), dec!(1.23));
    }

    #[test]
    fn test_rounded_uses_bankers_rounding() {
        // Midpoints round half-to-even
        assert_eq!(Money::new(dec!(2.345)).rounded().amount(), dec!(2.34));
        assert_eq!(Money::new(dec!(2.355)).rounded().amount(), dec!(2.36));
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_major_minor(2, 99);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.amount(), dec!(8.97));
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(
            Money::from_major_minor(-3, 0).clamp_non_negative(),
            Money::zero()
        );
        let positive = Money::from_major_minor(3, 0);
        assert_eq!(positive.clamp_non_negative(), positive);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_major_minor(1, 0);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_major_minor(-1, 0);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_serializes_as_string() {
        let money = Money::from_major_minor(10, 99);
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "\"10.99\"");
    }
}
