//! Subscription creation subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api/subscriptions
//!     → gate.rs (field presence check, no network on failure)
//!     → two concurrent existence probes
//!       GET /api/users/{userId}  → auth service
//!       GET /api/routes/{routeId} → route service
//!     → outcome.rs (fixed field-order precedence)
//!     → valid: delegate POST to subscription service, passthrough
//!     → invalid: 400 FOREIGN_KEY_VIOLATION / 503 SERVICE_UNAVAILABLE
//!
//! All other subscription methods bypass this gate and go through the
//! transparent proxy.
//! ```
//!
//! # Design Decisions
//! - Both probes always run to completion; precedence is decided by
//!   field order (userId before routeId), never by completion order
//! - A probe's transport failure becomes a 503 outcome, it never
//!   aborts the whole operation mid-flight

pub mod gate;
pub mod outcome;

pub use gate::create_subscription;
pub use outcome::{resolve, ProbeOutcome, ValidationOutcome};
