//! # QR Validation Seam
//!
//! The backend collaborator contract the scan controller depends on.
//!
//! The controller never talks HTTP itself; the app shell supplies an
//! implementation of [`QrValidator`] wired to the backend's validate-qr
//! endpoint. In tests a counting mock stands in.
//!
//! ## Contract
//! - One call per accepted scan, with the raw scanned payload.
//! - Success returns a [`RedemptionReceipt`]: the confirmation message plus
//!   the order fields the operator needs to see (event, total).
//! - The endpoint is idempotent from the server's perspective: a second
//!   call with an already-redeemed code returns a rejection, not a second
//!   fulfillment. The controller is the best-effort guard against issuing
//!   that redundant call; the server is the final authority.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use feira_core::OrderSummary;

use crate::error::RedemptionResult;

// =============================================================================
// Redemption Receipt
// =============================================================================

/// The success payload of a QR validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionReceipt {
    /// Human-readable confirmation for the operator.
    pub message: String,

    /// The redeemed order: event name, total paid, status.
    pub order: OrderSummary,
}

// =============================================================================
// Validator Trait
// =============================================================================

/// Backend QR validation collaborator.
#[async_trait]
pub trait QrValidator: Send + Sync {
    /// Validates a raw scanned payload against the backend.
    ///
    /// Implementations translate transport and HTTP-level failures into
    /// the [`RedemptionError`](crate::error::RedemptionError) taxonomy;
    /// the controller never sees a raw transport error.
    async fn validate(&self, qr_code: &str) -> RedemptionResult<RedemptionReceipt>;
}

#[async_trait]
impl<T: QrValidator + ?Sized> QrValidator for std::sync::Arc<T> {
    async fn validate(&self, qr_code: &str) -> RedemptionResult<RedemptionReceipt> {
        (**self).validate(qr_code).await
    }
}
