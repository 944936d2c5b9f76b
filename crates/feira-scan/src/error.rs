//! # Redemption Errors
//!
//! The failure taxonomy surfaced by the scan controller.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Collaborator failure            Surfaced as            Re-arm path    │
//! │  ────────────────────            ───────────            ───────────    │
//! │  camera permission missing  ──►  PermissionDenied  ──►  none (session  │
//! │                                                          is over)      │
//! │  backend rejects the code   ──►  ValidationRejected ──► explicit retry │
//! │  (invalid / already used)                                              │
//! │  transport failure          ──►  NetworkFailure    ──►  explicit retry │
//! │                                                                         │
//! │  Nothing escapes the controller uncaught; every collaborator failure   │
//! │  is translated into one of these three and parked in the Failed        │
//! │  phase until the user retries.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Redemption Error
// =============================================================================

/// A failed redemption attempt, by cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedemptionError {
    /// Camera access is unavailable. Terminal for the scanning session:
    /// there is nothing to retry until the OS-level permission changes.
    #[error("Camera permission denied")]
    PermissionDenied,

    /// The backend rejected the code: unknown, malformed, or already
    /// redeemed. Retryable - the operator points the camera at the next
    /// (or a corrected) code.
    #[error("QR code rejected: {reason}")]
    ValidationRejected { reason: String },

    /// Transient transport failure. Retryable.
    #[error("Network failure: {0}")]
    NetworkFailure(String),
}

impl RedemptionError {
    /// Whether the Failed phase should offer the retry affordance.
    ///
    /// `PermissionDenied` is the one terminal case: re-arming the scanner
    /// cannot help while the camera is unavailable.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, RedemptionError::PermissionDenied)
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for redemption results.
pub type RedemptionResult<T> = Result<T, RedemptionError>;

// =============================================================================
// Unit Tests
// =============================================================================
