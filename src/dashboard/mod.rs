//! Dashboard aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/commuter/dashboard
//!     → aggregator.rs
//!     → require Authorization (401 without it, no calls issued)
//!     → GET /api/auth/me (identity: `id`, fallback `userId`)
//!     → three concurrent fetches:
//!       GET /api/subscriptions/user/{id}   → subscription service
//!       GET /api/routes                    → route service
//!       GET /api/trips?userId={id}         → subscription service
//!     → all succeed: 200 {user, subscriptions, routes, trips}
//!     → any failure: 500 DASHBOARD_FAILED, partial data discarded
//! ```
//!
//! # Design Decisions
//! - The profile fetch is a genuine dependency: the fan-out never
//!   starts if it fails
//! - All-or-nothing: a partial dashboard is never returned

pub mod aggregator;

pub use aggregator::build_dashboard;
