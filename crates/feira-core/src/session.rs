//! # Checkout Session
//!
//! The single owning state object for one browsing-to-checkout flow.
//!
//! The original storefront kept the cart and the credit request in ambient
//! context reachable from any screen. Here the session owns them explicitly
//! and is injected into the screens that need it: one active cart per
//! session, no hidden globals, and the lifetime is obvious - the session is
//! dropped (or cleared) when the flow ends.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CheckoutSession                                   │
//! │                                                                         │
//! │   cart: Cart                    ◄── add/update/remove/clear             │
//! │   available_credits: Money      ◄── balance snapshot from the account   │
//! │   requested_credits: Money      ◄── normalized free-text input          │
//! │   fee_rate: FeeRate             ◄── 10% platform default                │
//! │                                                                         │
//! │   settlement() ──► compute_settlement(...)   recomputed on every read   │
//! │   order_request(event_id) ──► OrderRequest   the submission payload     │
//! │   complete_submission() ──► cart cleared     ONLY after backend accept  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::settlement::{compute_settlement, SettlementBreakdown};
use crate::types::{FeeRate, OrderRequest};
use crate::validation;

// =============================================================================
// Checkout Session
// =============================================================================

/// One browsing-to-checkout flow: the cart, the credit balance snapshot,
/// and the user's credit request.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    cart: Cart,
    available_credits: Money,
    requested_credits: Money,
    fee_rate: FeeRate,
}

impl CheckoutSession {
    /// Creates a session with the given account credit balance snapshot.
    pub fn new(available_credits: Money) -> Self {
        CheckoutSession {
            cart: Cart::new(),
            available_credits: available_credits.clamp_non_negative(),
            requested_credits: Money::zero(),
            fee_rate: FeeRate::platform(),
        }
    }

    /// Overrides the fee rate (tests, future per-event rates).
    pub fn with_fee_rate(mut self, fee_rate: FeeRate) -> Self {
        self.fee_rate = fee_rate;
        self
    }

    /// The cart ledger, read-only.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The cart ledger, for mutation.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// The account balance snapshot this session was opened with.
    pub fn available_credits(&self) -> Money {
        self.available_credits
    }

    /// Refreshes the balance snapshot (e.g., after a pull-to-refresh).
    pub fn refresh_credits(&mut self, available_credits: Money) {
        self.available_credits = available_credits.clamp_non_negative();
    }

    /// Records the free-text credit request from the checkout form.
    ///
    /// Garbage or negative input contributes zero; over-requests are kept
    /// as typed and clamped at settlement time. The UI can show the
    /// clamped figure by reading `settlement().credits_applied`.
    pub fn enter_credits(&mut self, raw: &str) {
        self.requested_credits = validation::parse_credit_input(raw);
    }

    /// One-tap "use all credits": requests exactly the available balance.
    ///
    /// Equivalent to typing the balance into the field - the settlement
    /// clamp does the rest. No separate code path.
    pub fn use_all_credits(&mut self) {
        self.requested_credits = self.available_credits;
    }

    /// The credit amount currently requested (normalized, pre-clamp).
    pub fn requested_credits(&self) -> Money {
        self.requested_credits
    }

    /// Computes the settlement breakdown from current state.
    ///
    /// Derived, never cached: the product-detail preview and the checkout
    /// summary both call this, so they cannot disagree.
    pub fn settlement(&self) -> SettlementBreakdown {
        compute_settlement(
            self.cart.subtotal(),
            self.fee_rate,
            self.available_credits,
            self.requested_credits,
        )
    }

    /// Builds the order submission payload for the backend collaborator.
    ///
    /// ## Errors
    /// [`CoreError::EmptyCart`] when there is nothing to submit.
    pub fn order_request(&self, event_id: impl Into<String>) -> CoreResult<OrderRequest> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(OrderRequest {
            reference: Uuid::new_v4(),
            event_id: event_id.into(),
            items: self.cart.order_lines(),
            credits_applied: self.settlement().credits_applied,
        })
    }

    /// Resets the session after the backend accepted the order.
    ///
    /// Postcondition of a successful submission only - a failed submission
    /// leaves the cart intact so the user can retry.
    pub fn complete_submission(&mut self) {
        let spent = self.settlement().credits_applied;
        self.available_credits = (self.available_credits - spent).clamp_non_negative();
        self.requested_credits = Money::zero();
        self.cart.clear();
    }
}

// =============================================================================
// Shared Session State
// =============================================================================

/// Shared handle for UI shells whose handlers run concurrently.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<CheckoutSession>>`:
/// - `Arc`: shared ownership across handlers
/// - `Mutex`: one mutation at a time
///
/// ## Why Not RwLock?
/// Session operations are quick and most of them mutate. An RwLock would
/// add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<CheckoutSession>>,
}

impl SessionState {
    /// Creates a shared session with the given credit balance snapshot.
    pub fn new(available_credits: Money) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(CheckoutSession::new(available_credits))),
        }
    }

    /// Executes a closure with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let breakdown = state.with_session(|s| s.settlement());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CheckoutSession) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a closure with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_session_mut(|s| s.cart_mut().add_item(id, name, 1, price));
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CheckoutSession) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
