//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → aggregator.rs
//!     → three concurrent /health probes (auth, route, subscription)
//!     → every outcome observed, no probe cancels another
//!     → 200 {status: "ok", services: {auth, route, subscription}}
//! ```
//!
//! # Design Decisions
//! - Best-effort join: wait for all, collect outcomes individually
//! - Transport-level success = "up"; the probe's HTTP status is ignored
//! - The summary itself is always 200, even with every service down:
//!   this is a liveness summary, not a readiness gate

pub mod aggregator;

pub use aggregator::{check_all, HealthReport, ServiceStatus};
