//! # Domain Types
//!
//! Core domain types used throughout Feira.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  OrderRequest   │   │  OrderSummary   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  reference      │   │  id             │       │
//! │  │  event_id       │   │  event_id       │   │  event_name     │       │
//! │  │  name           │   │  items          │   │  total          │       │
//! │  │  price          │   │  credits_applied│   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    FeeRate      │   │   OrderStatus   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  Pending        │                             │
//! │  │  1000 = 10%     │   │  Validated      │                             │
//! │  └─────────────────┘   │  Cancelled      │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend owns the authoritative versions of `Product` and orders;
//! these are the client-side transfer shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Fee Rate
// =============================================================================

/// Platform fee rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (the fixed platform fee)
///
/// An integer rate converts exactly to a decimal factor, so
/// `subtotal × rate` never picks up binary-float noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeeRate(u32);

impl FeeRate {
    /// Creates a fee rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        FeeRate(bps)
    }

    /// The fixed platform rate (10%).
    #[inline]
    pub const fn platform() -> Self {
        FeeRate(crate::PLATFORM_FEE_BPS)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact decimal factor (1000 bps -> 0.1000).
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.0 as i64, 4)
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero fee rate.
    #[inline]
    pub const fn zero() -> Self {
        FeeRate(0)
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        FeeRate::platform()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product on an event's menu, as served by the catalog endpoint.
///
/// ## Stock Is Advisory
/// `stock` reflects the catalog at fetch time. The UI uses it to keep the
/// add-to-cart button honest, but the backend re-validates and decrements
/// atomically on order submission. The cart never trusts this number.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (backend-issued, opaque).
    pub id: String,

    /// Event this product belongs to.
    pub event_id: String,

    /// Display name shown in the menu and on the order summary.
    pub name: String,

    /// Optional description.
    pub description: Option<String>,

    /// Unit price. Snapshot into the cart line on add; not re-fetched.
    pub price: Money,

    /// Units available at fetch time.
    pub stock: i64,

    /// Whether the product is currently orderable.
    pub is_active: bool,
}

// =============================================================================
// Order Submission
// =============================================================================

/// One line of an order submission, snapshot from the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,

    /// Display label only; the backend resolves the authoritative product.
    pub product_name: String,

    pub quantity: i64,

    pub unit_price: Money,
}

/// The order submission payload handed to the backend collaborator.
///
/// ## Responsibility Boundary
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CLIENT (this crate)                 BACKEND (system of record)        │
/// │  ───────────────────                 ──────────────────────────        │
/// │  correct item list                   stock re-validation               │
/// │  correct credits_applied             atomic stock decrement            │
/// │  submission reference                credit ledger debit               │
/// │                                      QR code issuance                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Client-generated reference so the backend can deduplicate a
    /// double-submitted checkout (tap-tap on the pay button).
    #[ts(as = "String")]
    pub reference: Uuid,

    /// Event the order belongs to.
    pub event_id: String,

    /// Snapshot of the cart at submission time.
    pub items: Vec<OrderLine>,

    /// Credits to debit, already clamped by the settlement calculator.
    pub credits_applied: Money,
}

// =============================================================================
// Order Lifecycle
// =============================================================================

/// Backend order lifecycle. `Validated` means the QR has been redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Validated,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Validated => write!(f, "validated"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Order fields surfaced by the QR validation endpoint.
///
/// This is what the scan operator sees on a successful redemption:
/// which event, how much was paid, and when it was consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,

    pub event_name: String,

    pub total: Money,

    pub status: OrderStatus,

    /// Set once the order has been redeemed.
    #[ts(as = "Option<String>")]
    pub validated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Unit Tests
// =============================================================================
