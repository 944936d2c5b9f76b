//! # Scan Controller
//!
//! The state machine guarding the one-shot QR validation call.
//!
//! ## Why This Exists
//! The camera keeps producing frames: a single physical QR code in front of
//! the lens fires scan events repeatedly, and two codes can fire
//! back-to-back. Without a gate, every frame becomes a network call and a
//! ticket can be submitted for validation twice concurrently. The original
//! storefront guarded this with a `scanned`/`loading` boolean pair; this is
//! the same guard as an explicit four-phase machine, so an illegal
//! transition is unrepresentable instead of latent.
//!
//! ## Phase Diagram
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Redemption Scan Phases                              │
//! │                                                                         │
//! │                 scan accepted                                           │
//! │   ┌──────────┐ ─────────────► ┌────────────┐                            │
//! │   │   Idle   │                │ Submitting │ (one request in flight)    │
//! │   └──────────┘ ◄┐             └─────┬──────┘                            │
//! │        ▲        │                   │                                   │
//! │        │        │          ┌────────┴────────┐                          │
//! │        │        │          ▼                 ▼                          │
//! │        │        │   ┌────────────┐    ┌────────────┐                    │
//! │        │        │   │ Succeeded  │    │   Failed   │                    │
//! │        │        │   └─────┬──────┘    └─────┬──────┘                    │
//! │        │        │         │                 │                           │
//! │        │   acknowledge_success()         retry()                        │
//! │        └────────┴─────────┴─────────────────┘                           │
//! │                                                                         │
//! │   Scan events in Submitting/Succeeded/Failed: DROPPED, no side effect.  │
//! │   Re-arm is ALWAYS an explicit user action, never automatic.            │
//! │   Success and failure re-arm through DIFFERENT affordances: success     │
//! │   already consumed the ticket, failure did not.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Scan events arrive asynchronously. The "am I Idle" check and the
//! transition to Submitting happen under one mutex guard, so two events
//! racing the gate cannot both pass. The lock is never held across the
//! `.await` on the validation call; a generation counter detects responses
//! that land after the controller was disposed or re-armed.

use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::error::RedemptionError;
use crate::validator::{QrValidator, RedemptionReceipt};

// =============================================================================
// Scan Phase
// =============================================================================

/// Where the controller is in the scan-to-result cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Ready to accept a scan.
    Idle,
    /// A validation request is in flight.
    Submitting,
    /// Terminal display state; re-arm via `acknowledge_success` only.
    Succeeded,
    /// Terminal display state; re-arm via `retry` only.
    Failed,
}

impl std::fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanPhase::Idle => write!(f, "idle"),
            ScanPhase::Submitting => write!(f, "submitting"),
            ScanPhase::Succeeded => write!(f, "succeeded"),
            ScanPhase::Failed => write!(f, "failed"),
        }
    }
}

// =============================================================================
// Redemption Attempt
// =============================================================================

/// Ephemeral per-scan-event state: the raw code and where it is in the
/// cycle. Exists only for the duration of one scan-to-result cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionAttempt {
    /// The raw scanned payload.
    pub qr_code: String,

    /// Current phase of the attempt.
    pub phase: ScanPhase,
}

// =============================================================================
// Scan Outcome
// =============================================================================

/// What a call to [`ScanController::handle_scan`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// The event arrived outside `Idle` (or after disposal) and was
    /// dropped without side effect. An expected race, not a fault.
    Ignored,

    /// The backend confirmed the redemption; the controller is parked in
    /// `Succeeded` until the operator acknowledges.
    Succeeded(RedemptionReceipt),

    /// The attempt failed; the controller is parked in `Failed` until the
    /// operator retries (if retryable).
    Failed(RedemptionError),
}

// =============================================================================
// Controller Internals
// =============================================================================

/// Mutable state behind the mutex. `generation` increments on every
/// accepted scan; a validation response whose generation no longer matches
/// is stale and must not touch the state.
#[derive(Debug)]
struct Inner {
    phase: ScanPhase,
    generation: u64,
    disposed: bool,
    qr_code: Option<String>,
    receipt: Option<RedemptionReceipt>,
    error: Option<RedemptionError>,
}

impl Inner {
    fn new() -> Self {
        Inner {
            phase: ScanPhase::Idle,
            generation: 0,
            disposed: false,
            qr_code: None,
            receipt: None,
            error: None,
        }
    }
}

// =============================================================================
// Scan Controller
// =============================================================================

/// Guards a one-shot validation call per physical scan event.
///
/// ## Guarantee
/// At most one outstanding validation request per controller instance, and
/// no new request starts before the previous result is acknowledged.
///
/// ## Usage
/// ```rust,ignore
/// let controller = Arc::new(ScanController::new(http_validator));
///
/// // camera callback
/// match controller.handle_scan(&frame.payload).await {
///     ScanOutcome::Ignored => {}               // expected while busy
///     ScanOutcome::Succeeded(receipt) => show_confirmation(receipt),
///     ScanOutcome::Failed(err) => show_failure(err),
/// }
///
/// // confirmation dialog "OK" button
/// controller.acknowledge_success();
///
/// // failure dialog "Tentar Novamente" button
/// controller.retry();
/// ```
#[derive(Debug)]
pub struct ScanController<V> {
    validator: V,
    inner: Mutex<Inner>,
}

impl<V: QrValidator> ScanController<V> {
    /// Creates a controller in `Idle` with the given backend collaborator.
    pub fn new(validator: V) -> Self {
        ScanController {
            validator,
            inner: Mutex::new(Inner::new()),
        }
    }

    /// Handles one scan event end to end.
    ///
    /// Accepted only in `Idle`: the phase check and the transition to
    /// `Submitting` are a single step under the lock, so concurrent events
    /// cannot both pass the gate. Exactly one validator call is issued per
    /// accepted scan. Events arriving in any other phase return
    /// [`ScanOutcome::Ignored`] with zero side effects.
    pub async fn handle_scan(&self, raw_code: &str) -> ScanOutcome {
        // Gate: check Idle and claim the slot atomically.
        let generation = {
            let mut inner = self.inner.lock().expect("Scan state mutex poisoned");
            if inner.disposed {
                debug!(qr_code = %raw_code, "scan dropped: controller disposed");
                return ScanOutcome::Ignored;
            }
            if inner.phase != ScanPhase::Idle {
                debug!(qr_code = %raw_code, phase = %inner.phase, "scan dropped: not idle");
                return ScanOutcome::Ignored;
            }
            inner.phase = ScanPhase::Submitting;
            inner.generation += 1;
            inner.qr_code = Some(raw_code.to_string());
            inner.receipt = None;
            inner.error = None;
            inner.generation
        };

        debug!(qr_code = %raw_code, "validation request issued");
        // The single suspension point. The lock is NOT held here.
        let result = self.validator.validate(raw_code).await;

        let mut inner = self.inner.lock().expect("Scan state mutex poisoned");
        if inner.disposed || inner.generation != generation || inner.phase != ScanPhase::Submitting
        {
            // The controller was torn down (or force-reset) while the
            // request was in flight: the late response must not mutate it.
            debug!(qr_code = %raw_code, "stale validation response ignored");
            return ScanOutcome::Ignored;
        }

        match result {
            Ok(receipt) => {
                info!(order_id = %receipt.order.id, event = %receipt.order.event_name, "redemption succeeded");
                inner.phase = ScanPhase::Succeeded;
                inner.receipt = Some(receipt.clone());
                ScanOutcome::Succeeded(receipt)
            }
            Err(err) => {
                warn!(qr_code = %raw_code, error = %err, "redemption failed");
                inner.phase = ScanPhase::Failed;
                inner.error = Some(err.clone());
                ScanOutcome::Failed(err)
            }
        }
    }

    /// Re-arms after a success, once the operator has acknowledged the
    /// confirmation. `Succeeded -> Idle` only; returns whether it re-armed.
    pub fn acknowledge_success(&self) -> bool {
        let mut inner = self.inner.lock().expect("Scan state mutex poisoned");
        if inner.disposed || inner.phase != ScanPhase::Succeeded {
            debug!(phase = %inner.phase, "acknowledge_success ignored");
            return false;
        }
        debug!("success acknowledged, re-armed");
        inner.phase = ScanPhase::Idle;
        inner.qr_code = None;
        true
    }

    /// Re-arms after a failure, as an explicit retry action.
    /// `Failed -> Idle` only; returns whether it re-armed.
    ///
    /// Deliberately a different entry point from `acknowledge_success`:
    /// success consumed the ticket, failure did not, and the two dialogs
    /// must not share a "continue" affordance.
    pub fn retry(&self) -> bool {
        let mut inner = self.inner.lock().expect("Scan state mutex poisoned");
        if inner.disposed || inner.phase != ScanPhase::Failed {
            debug!(phase = %inner.phase, "retry ignored");
            return false;
        }
        debug!("failure retried, re-armed");
        inner.phase = ScanPhase::Idle;
        inner.qr_code = None;
        inner.error = None;
        true
    }

    /// Tears the controller down (the scanner view closed).
    ///
    /// An in-flight validation response arriving afterwards is dropped;
    /// every subsequent scan event is ignored. This is an ordering
    /// guarantee, not a literal network cancellation - the request may
    /// still complete server-side.
    pub fn dispose(&self) {
        let mut inner = self.inner.lock().expect("Scan state mutex poisoned");
        if !inner.disposed {
            debug!(phase = %inner.phase, "controller disposed");
            inner.disposed = true;
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ScanPhase {
        self.inner.lock().expect("Scan state mutex poisoned").phase
    }

    /// The current attempt, if a scan cycle is underway.
    pub fn current_attempt(&self) -> Option<RedemptionAttempt> {
        let inner = self.inner.lock().expect("Scan state mutex poisoned");
        inner.qr_code.as_ref().map(|qr_code| RedemptionAttempt {
            qr_code: qr_code.clone(),
            phase: inner.phase,
        })
    }

    /// The receipt held in `Succeeded`, for the confirmation dialog.
    pub fn receipt(&self) -> Option<RedemptionReceipt> {
        self.inner
            .lock()
            .expect("Scan state mutex poisoned")
            .receipt
            .clone()
    }

    /// The error held in `Failed`, for the failure dialog.
    pub fn last_error(&self) -> Option<RedemptionError> {
        self.inner
            .lock()
            .expect("Scan state mutex poisoned")
            .error
            .clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use feira_core::{Money, OrderStatus, OrderSummary};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn receipt_for(event: &str) -> RedemptionReceipt {
        RedemptionReceipt {
            message: "Pedido validado com sucesso!".to_string(),
            order: OrderSummary {
                id: "order-1".to_string(),
                event_name: event.to_string(),
                total: Money::from_major_minor(55, 0),
                status: OrderStatus::Validated,
                validated_at: None,
            },
        }
    }

    /// Counts calls; replies according to the configured outcome. The call
    /// counter is shared so the test can keep a handle after the controller
    /// takes ownership of its clone.
    #[derive(Clone)]
    struct CountingValidator {
        calls: std::sync::Arc<AtomicUsize>,
        outcome: Result<RedemptionReceipt, RedemptionError>,
    }

    impl CountingValidator {
        fn succeeding() -> Self {
            CountingValidator {
                calls: std::sync::Arc::new(AtomicUsize::new(0)),
                outcome: Ok(receipt_for("Festa Junina")),
            }
        }

        fn failing(err: RedemptionError) -> Self {
            CountingValidator {
                calls: std::sync::Arc::new(AtomicUsize::new(0)),
                outcome: Err(err),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QrValidator for CountingValidator {
        async fn validate(&self, _qr_code: &str) -> Result<RedemptionReceipt, RedemptionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn test_success_parks_until_acknowledged() {
        let validator = CountingValidator::succeeding();
        let controller = ScanController::new(validator.clone());

        let outcome = controller.handle_scan("ORDER-abc").await;
        assert!(matches!(outcome, ScanOutcome::Succeeded(_)));
        assert_eq!(controller.phase(), ScanPhase::Succeeded);
        assert!(controller.receipt().is_some());

        // A scan in Succeeded is dropped - no second request
        let second = controller.handle_scan("ORDER-abc").await;
        assert_eq!(second, ScanOutcome::Ignored);
        assert_eq!(validator.calls(), 1);

        // Explicit acknowledgement re-arms
        assert!(controller.acknowledge_success());
        assert_eq!(controller.phase(), ScanPhase::Idle);
        assert!(controller.current_attempt().is_none());
    }

    #[tokio::test]
    async fn test_failure_parks_until_retried() {
        let validator = CountingValidator::failing(RedemptionError::ValidationRejected {
            reason: "QR Code inválido".to_string(),
        });
        let controller = ScanController::new(validator.clone());

        let outcome = controller.handle_scan("BOGUS").await;
        assert!(matches!(outcome, ScanOutcome::Failed(_)));
        assert_eq!(controller.phase(), ScanPhase::Failed);
        assert!(controller.last_error().is_some());

        // The success affordance does nothing in Failed
        assert!(!controller.acknowledge_success());
        assert_eq!(controller.phase(), ScanPhase::Failed);

        // The retry affordance re-arms
        assert!(controller.retry());
        assert_eq!(controller.phase(), ScanPhase::Idle);
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn test_retry_does_nothing_after_success() {
        let validator = CountingValidator::succeeding();
        let controller = ScanController::new(validator.clone());

        controller.handle_scan("ORDER-abc").await;
        assert!(!controller.retry());
        assert_eq!(controller.phase(), ScanPhase::Succeeded);
    }

    #[tokio::test]
    async fn test_disposed_controller_ignores_everything() {
        let validator = CountingValidator::succeeding();
        let controller = ScanController::new(validator.clone());

        controller.dispose();
        let outcome = controller.handle_scan("ORDER-abc").await;
        assert_eq!(outcome, ScanOutcome::Ignored);
        assert_eq!(validator.calls(), 0);
        assert!(!controller.acknowledge_success());
        assert!(!controller.retry());
    }

    #[tokio::test]
    async fn test_current_attempt_tracks_cycle() {
        let validator = CountingValidator::succeeding();
        let controller = ScanController::new(validator.clone());

        assert!(controller.current_attempt().is_none());
        controller.handle_scan("ORDER-abc").await;

        let attempt = controller.current_attempt().unwrap();
        assert_eq!(attempt.qr_code, "ORDER-abc");
        assert_eq!(attempt.phase, ScanPhase::Succeeded);
    }
}
