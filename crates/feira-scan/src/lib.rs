//! # feira-scan: Redemption Scan Controller for Feira
//!
//! One physical QR code, one validation call. This crate owns the state
//! machine that turns a noisy stream of camera scan events into at most one
//! outstanding backend validation request, and governs how the scanner
//! re-arms after a result.
//!
//! ## The Problem
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Camera frames      Without the guard          With ScanController      │
//! │  ─────────────      ─────────────────          ───────────────────      │
//! │  scan "ABC123" ──►  request #1                 request #1 (accepted)    │
//! │  scan "ABC123" ──►  request #2  ❌             dropped                  │
//! │  scan "XYZ999" ──►  request #3  ❌             dropped                  │
//! │  ...                duplicate redemptions      one outcome, explicit    │
//! │                     and racing dialogs         re-arm                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend's validate-qr endpoint is idempotent and remains the final
//! authority against double redemption (including the same code scanned on
//! two devices); this controller is the client-side best-effort guard that
//! keeps redundant calls and contradictory dialogs off the screen.
//!
//! ## Modules
//!
//! - [`controller`] - the `Idle -> Submitting -> Succeeded/Failed` machine
//! - [`validator`] - the backend collaborator seam ([`QrValidator`])
//! - [`error`] - the failure taxonomy surfaced to the UI
//!
//! ## Example
//!
//! ```rust
//! use feira_scan::{QrValidator, RedemptionReceipt, RedemptionResult, ScanController, ScanOutcome};
//!
//! struct AlwaysRejects;
//!
//! #[async_trait::async_trait]
//! impl QrValidator for AlwaysRejects {
//!     async fn validate(&self, _qr_code: &str) -> RedemptionResult<RedemptionReceipt> {
//!         Err(feira_scan::RedemptionError::ValidationRejected {
//!             reason: "QR Code inválido".to_string(),
//!         })
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let controller = ScanController::new(AlwaysRejects);
//! let outcome = controller.handle_scan("BOGUS").await;
//! assert!(matches!(outcome, ScanOutcome::Failed(_)));
//!
//! // Re-arming after a failure is the explicit retry action
//! assert!(controller.retry());
//! # });
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod controller;
pub mod error;
pub mod validator;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use controller::{RedemptionAttempt, ScanController, ScanOutcome, ScanPhase};
pub use error::{RedemptionError, RedemptionResult};
pub use validator::{QrValidator, RedemptionReceipt};
