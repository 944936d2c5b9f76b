//! # Settlement Calculator
//!
//! The pure function that turns a cart subtotal, the platform fee rate, and
//! a credit request into the payment breakdown.
//!
//! ## Why One Function
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The cart preview and the checkout screen BOTH show a breakdown.        │
//! │  If they computed it separately they could disagree; both call          │
//! │  compute_settlement(), so they agree bit-for-bit.                       │
//! │                                                                         │
//! │  subtotal ────────────────────┐                                         │
//! │  fee rate (10%) ──────────────┤                                         │
//! │  available credits ───────────┼──► compute_settlement()                 │
//! │  requested credits ───────────┘         │                               │
//! │                                         ▼                               │
//! │              { subtotal, platform_fee, credits_applied, total }         │
//! │                                                                         │
//! │  credits_applied = max(0, min(requested, available, subtotal + fee))    │
//! │  total           = subtotal + fee - credits_applied   (always >= 0)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The breakdown is derived, never stored: every read recomputes it from
//! current inputs. The backend performs the same computation on submission
//! and remains the authority; this is the preview it must match.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::FeeRate;

// =============================================================================
// Settlement Breakdown
// =============================================================================

/// The computed payment breakdown for a cart.
///
/// All fields carry full precision. Call [`SettlementBreakdown::rounded`]
/// for the display copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SettlementBreakdown {
    /// Σ(unit_price × quantity) over the cart.
    pub subtotal: Money,

    /// `subtotal × fee_rate`, unrounded.
    pub platform_fee: Money,

    /// Credits actually applied after the clamp. Never exceeds the amount
    /// due, the account balance, or the request.
    pub credits_applied: Money,

    /// `subtotal + platform_fee - credits_applied`. Never negative; zero
    /// exactly when credits cover the amount due.
    pub total: Money,
}

impl SettlementBreakdown {
    /// The amount due before credits.
    pub fn amount_due(&self) -> Money {
        self.subtotal + self.platform_fee
    }

    /// Returns a copy with every field rounded to two decimal places.
    ///
    /// For display only. Composing rounded intermediates is exactly what
    /// the full-precision pipeline exists to avoid.
    pub fn rounded(&self) -> Self {
        SettlementBreakdown {
            subtotal: self.subtotal.rounded(),
            platform_fee: self.platform_fee.rounded(),
            credits_applied: self.credits_applied.rounded(),
            total: self.total.rounded(),
        }
    }
}

// =============================================================================
// Settlement Computation
// =============================================================================

/// Computes the settlement breakdown for a cart.
///
/// ## Inputs
/// - `subtotal`: the cart ledger's exact subtotal (>= 0)
/// - `fee_rate`: fixed at 10% platform-wide, parameterized for testability
/// - `available_credits`: the account balance snapshot (>= 0)
/// - `requested_credits`: whatever the user asked for, already normalized
///   by [`crate::validation::parse_credit_input`] when it came from free
///   text. A negative value arriving here is still clamped to zero.
///
/// ## Guarantees
/// - `0 <= credits_applied <= min(requested, available, subtotal + fee)`
/// - `total >= 0`, and `total == 0` exactly when credits cover the due
/// - Pure: same inputs, same output, no hidden state
///
/// ## "Use all credits"
/// The one-tap convenience is this same function called with
/// `requested_credits = available_credits`. There is no separate path.
pub fn compute_settlement(
    subtotal: Money,
    fee_rate: FeeRate,
    available_credits: Money,
    requested_credits: Money,
) -> SettlementBreakdown {
    let platform_fee = subtotal.apply_rate(fee_rate);
    let amount_due = subtotal + platform_fee;

    // Clamp: never below zero, never above the balance, never above the due.
    let credits_applied = requested_credits
        .clamp_non_negative()
        .min(available_credits.clamp_non_negative())
        .min(amount_due);

    let total = (amount_due - credits_applied).clamp_non_negative();

    SettlementBreakdown {
        subtotal,
        platform_fee,
        credits_applied,
        total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(d: rust_decimal::Decimal) -> Money {
        Money::new(d)
    }

    #[test]
    fn test_no_credits() {
        // Cart: 2 × R$ 25.00 -> subtotal 50.00, fee 5.00, total 55.00
        let breakdown = compute_settlement(
            money(dec!(50.00)),
            FeeRate::from_bps(1000),
            Money::zero(),
            Money::zero(),
        );

        assert_eq!(breakdown.subtotal, money(dec!(50.00)));
        assert_eq!(breakdown.platform_fee, money(dec!(5.000)));
        assert!(breakdown.credits_applied.is_zero());
        assert_eq!(breakdown.total, money(dec!(55.000)));
    }

    #[test]
    fn test_credits_cap_at_amount_due() {
        // Balance 60, request 60, due 55 -> apply 55, total 0
        let breakdown = compute_settlement(
            money(dec!(50.00)),
            FeeRate::from_bps(1000),
            money(dec!(60.00)),
            money(dec!(60.00)),
        );

        assert_eq!(breakdown.credits_applied, money(dec!(55.000)));
        assert!(breakdown.total.is_zero());
    }

    #[test]
    fn test_credits_cap_at_balance() {
        // Balance 20, request 100, due 55 -> apply 20, total 35
        let breakdown = compute_settlement(
            money(dec!(50.00)),
            FeeRate::from_bps(1000),
            money(dec!(20.00)),
            money(dec!(100.00)),
        );

        assert_eq!(breakdown.credits_applied, money(dec!(20.00)));
        assert_eq!(breakdown.total, money(dec!(35.000)));
    }

    #[test]
    fn test_negative_request_normalizes_to_zero() {
        let breakdown = compute_settlement(
            money(dec!(50.00)),
            FeeRate::from_bps(1000),
            money(dec!(60.00)),
            money(dec!(-10.00)),
        );

        assert!(breakdown.credits_applied.is_zero());
        assert_eq!(breakdown.total, money(dec!(55.000)));
    }

    #[test]
    fn test_use_all_credits_is_same_code_path() {
        let subtotal = money(dec!(50.00));
        let available = money(dec!(60.00));

        // "Use all credits" = requested == available
        let one_tap = compute_settlement(
            subtotal,
            FeeRate::from_bps(1000),
            available,
            available,
        );
        let general = compute_settlement(
            subtotal,
            FeeRate::from_bps(1000),
            available,
            money(dec!(60.00)),
        );

        assert_eq!(one_tap, general);
        assert_eq!(one_tap.credits_applied, money(dec!(55.000)));
    }

    #[test]
    fn test_idempotent() {
        let a = compute_settlement(
            money(dec!(33.33)),
            FeeRate::from_bps(1000),
            money(dec!(10.00)),
            money(dec!(7.77)),
        );
        let b = compute_settlement(
            money(dec!(33.33)),
            FeeRate::from_bps(1000),
            money(dec!(10.00)),
            money(dec!(7.77)),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_total_zero_exactly_when_credits_cover_due() {
        let due_exactly = compute_settlement(
            money(dec!(50.00)),
            FeeRate::from_bps(1000),
            money(dec!(55.00)),
            money(dec!(55.00)),
        );
        assert!(due_exactly.total.is_zero());

        let one_centavo_short = compute_settlement(
            money(dec!(50.00)),
            FeeRate::from_bps(1000),
            money(dec!(54.99)),
            money(dec!(54.99)),
        );
        assert_eq!(one_centavo_short.total, money(dec!(0.010)));
    }

    /// The total is composed at full precision and rounded once; that final
    /// rounding can move each displayed figure by at most half a display
    /// unit. Composing display-rounded intermediates instead can drift a
    /// whole centavo - which is exactly why the pipeline never does it.
    #[test]
    fn test_display_rounding_drift_is_bounded() {
        // Awkward precision on purpose: fee 2.470, credits 3.555
        let subtotal = money(dec!(12.34)) + money(dec!(12.35)) + money(dec!(0.01));
        let breakdown = compute_settlement(
            subtotal,
            FeeRate::from_bps(1000),
            money(dec!(3.555)),
            money(dec!(3.555)),
        );

        let half_unit = dec!(0.005);
        for (full, shown) in [
            (breakdown.subtotal, breakdown.subtotal.rounded()),
            (breakdown.platform_fee, breakdown.platform_fee.rounded()),
            (breakdown.credits_applied, breakdown.credits_applied.rounded()),
            (breakdown.total, breakdown.total.rounded()),
        ] {
            let drift = (shown.amount() - full.amount()).abs();
            assert!(
                drift <= half_unit,
                "display drift {} exceeds half a display unit",
                drift
            );
        }

        // The naive composition of rounded intermediates disagrees with the
        // rounded exact total here (23.61 vs 23.62) - documented hazard.
        let naive = breakdown.subtotal.rounded() + breakdown.platform_fee.rounded()
            - breakdown.credits_applied.rounded();
        assert_ne!(naive, breakdown.total.rounded());
    }
}
