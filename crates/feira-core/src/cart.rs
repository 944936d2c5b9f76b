//! # Cart Ledger
//!
//! The in-memory, order-scoped collection of line items.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Ledger Operations                             │
//! │                                                                         │
//! │  UI Action                 Operation              Ledger Change         │
//! │  ─────────                 ─────────              ─────────────         │
//! │                                                                         │
//! │  Tap product ────────────► add_item() ──────────► merge or append      │
//! │                                                                         │
//! │  Change quantity ────────► update_quantity() ───► set qty / remove     │
//! │                                                                         │
//! │  Tap remove ─────────────► remove_item() ───────► drop line            │
//! │                                                                         │
//! │  Order submitted ────────► clear() ─────────────► empty                │
//! │                                                                         │
//! │  Any screen ─────────────► subtotal() ──────────► (read only)          │
//! │                                                                         │
//! │  EVERY operation is total: nothing here can fail, because the ledger   │
//! │  only touches local state. Stock checks belong to the catalog          │
//! │  collaborator; submission failures belong to the backend.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per `product_id` (adding the same product merges)
//! - Every line has `quantity > 0` (a drop to zero removes the line)
//! - `subtotal()` is the exact sum of `unit_price × quantity`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::OrderLine;

// =============================================================================
// Cart Line
// =============================================================================

/// One product selected for purchase.
///
/// ## Design Notes
/// - `product_id`: the unique key within the cart
/// - `product_name` and `unit_price` are frozen at the moment of adding;
///   the cart displays consistent data even if the catalog changes
///   afterwards, and the backend re-resolves prices on submission anyway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product identifier (backend-issued, opaque).
    pub product_id: String,

    /// Product name at time of adding (display only).
    pub product_name: String,

    /// Price at time of adding (frozen snapshot).
    pub unit_price: Money,

    /// Quantity in cart. Always > 0 while the line exists.
    pub quantity: i64,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Calculates the line total (unit price × quantity), full precision.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart ledger: an ordered collection of [`CartLine`]s, scoped to one
/// browsing-to-checkout flow.
///
/// Not persisted across restarts; the owning [`CheckoutSession`]
/// (`crate::session`) controls its lifetime, and `clear()` is called only
/// after the backend accepted the order.
///
/// [`CheckoutSession`]: crate::session::CheckoutSession
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in insertion order.
    lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart or merges into the existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increments by `quantity`
    /// - Product not in cart: appended as a new line
    /// - `quantity <= 0`: dropped silently (an expected guard violation,
    ///   not a fault - stock and range checks happen at the UI boundary)
    pub fn add_item(
        &mut self,
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) {
        if quantity <= 0 {
            return;
        }

        let product_id = product_id.into();
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity += quantity;
            return;
        }

        self.lines.push(CartLine {
            product_id,
            product_name: product_name.into(),
            unit_price,
            quantity,
            added_at: Utc::now(),
        });
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: behaves exactly like [`Cart::remove_item`]
    /// - Product not in cart: no-op
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Removes a line by product ID. No-op if absent.
    ///
    /// A zero-quantity line can never be left behind: removal deletes the
    /// whole line.
    pub fn remove_item(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Clears all lines unconditionally.
    ///
    /// ## When Used
    /// - After the backend accepted the order submission
    /// - Explicit "clear cart" action
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Exact subtotal: Σ(unit_price × quantity). Zero for an empty cart.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
    }

    /// Returns the lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the number of unique lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Snapshots the cart into order submission lines.
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|l| OrderLine {
                product_id: l.product_id.clone(),
                product_name: l.product_name.clone(),
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn beer() -> Money {
        Money::from_major_minor(25, 0)
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        cart.add_item("p-1", "Chopp Pilsen", 2, beer());

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal(), Money::from_major_minor(50, 0));
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new();
        cart.add_item("p-1", "Chopp Pilsen", 2, beer());
        cart.add_item("p-1", "Chopp Pilsen", 3, beer());

        assert_eq!(cart.line_count(), 1); // still one unique line
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.subtotal(), Money::from_major_minor(125, 0));
    }

    #[test]
    fn test_add_non_positive_quantity_is_dropped() {
        let mut cart = Cart::new();
        cart.add_item("p-1", "Chopp Pilsen", 0, beer());
        cart.add_item("p-2", "Espetinho", -4, Money::from_major_minor(12, 0));

        assert!(cart.is_empty());
        assert!(cart.subtotal().is_zero());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add_item("p-1", "Chopp Pilsen", 2, beer());
        cart.update_quantity("p-1", 7);

        assert_eq!(cart.total_quantity(), 7);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item("p-1", "Chopp Pilsen", 2, beer());
        cart.update_quantity("p-1", 0);

        assert!(cart.is_empty());

        cart.add_item("p-1", "Chopp Pilsen", 2, beer());
        cart.update_quantity("p-1", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_item("p-1", "Chopp Pilsen", 2, beer());
        cart.update_quantity("nope", 5);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item("p-1", "Chopp Pilsen", 2, beer());
        cart.add_item("p-2", "Espetinho", 1, Money::from_major_minor(12, 0));

        cart.remove_item("p-1");
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.subtotal(), Money::from_major_minor(12, 0));

        // removing again is a no-op
        cart.remove_item("p-1");
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_add_then_remove_round_trip() {
        let mut cart = Cart::new();
        cart.add_item("p-1", "Chopp Pilsen", 2, beer());
        let before = cart.subtotal();

        cart.add_item("p-2", "Espetinho", 3, Money::from_major_minor(12, 0));
        cart.remove_item("p-2");

        assert_eq!(cart.subtotal(), before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item("p-1", "Chopp Pilsen", 2, beer());
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.subtotal().is_zero());
    }

    #[test]
    fn test_order_lines_snapshot() {
        let mut cart = Cart::new();
        cart.add_item("p-1", "Chopp Pilsen", 2, beer());

        let lines = cart.order_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, "p-1");
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].unit_price, beer());
    }
}
