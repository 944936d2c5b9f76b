//! # feira-core: Pure Business Logic for Feira
//!
//! This crate is the **heart** of the Feira storefront. It contains the cart
//! ledger and the settlement calculator as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Feira Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront UI (TypeScript)                     │   │
//! │  │    Event list ──► Product detail ──► Cart ──► Checkout          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ feira-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │ settlement │  │  session  │  │   │
//! │  │   │   Money   │  │   Cart    │  │  Breakdown │  │  Checkout │  │   │
//! │  │   │  FeeRate  │  │ CartLine  │  │  compute   │  │  Session  │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  REST backend (system of record)                │   │
//! │  │        order persistence, stock decrement, credit ledger        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` type with exact decimal arithmetic (no floats!)
//! - [`types`] - Domain types (Product, OrderRequest, FeeRate, etc.)
//! - [`error`] - Domain error types
//! - [`validation`] - Free-text input normalization
//! - [`cart`] - The cart ledger (merge, update, remove, subtotal)
//! - [`settlement`] - The settlement calculator (fee + credit clamp)
//! - [`session`] - The owning checkout session (one per browsing flow)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Exact Money**: All monetary values are `rust_decimal` decimals; the
//!    full-precision value flows through every computation and is rounded
//!    only at the display boundary
//! 4. **Normalize, Don't Fail**: User input that makes no sense (negative
//!    credits, garbage text) is clamped or normalized to a neutral value;
//!    the calculator is always callable
//! 5. **Preview, Not Authority**: The backend recomputes everything on
//!    submission; this crate exists so the preview agrees with it
//!
//! ## Example Usage
//!
//! ```rust
//! use feira_core::{Cart, FeeRate, Money, compute_settlement};
//!
//! let mut cart = Cart::new();
//! cart.add_item("p-1", "Chopp Pilsen", 2, Money::from_major_minor(25, 0));
//!
//! let breakdown = compute_settlement(
//!     cart.subtotal(),
//!     FeeRate::from_bps(1000),      // 10% platform fee
//!     Money::from_major_minor(60, 0), // available credits
//!     Money::from_major_minor(60, 0), // requested credits
//! );
//!
//! // Credits cap at the amount due ($55.00), not at the balance
//! assert_eq!(breakdown.credits_applied, Money::from_major_minor(55, 0));
//! assert!(breakdown.total.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod session;
pub mod settlement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use feira_core::Money` instead of
// `use feira_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::{CheckoutSession, SessionState};
pub use settlement::{compute_settlement, SettlementBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Platform fee rate in basis points (1000 = 10%).
///
/// ## Why a constant?
/// The fee is fixed platform-wide today. The settlement calculator still
/// takes the rate as a parameter so tests (and a future per-event rate)
/// don't need to patch a global.
pub const PLATFORM_FEE_BPS: u32 = 1000;

/// Maximum quantity of a single product in a cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Stock availability itself is checked by the product catalog collaborator
/// before items reach the cart; this is only a sanity ceiling.
pub const MAX_LINE_QUANTITY: i64 = 999;
