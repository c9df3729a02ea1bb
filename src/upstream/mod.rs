//! Upstream access subsystem.
//!
//! # Data Flow
//! ```text
//! Component (proxy, health, gate, dashboard)
//!     → target.rs (which backend service, base address)
//!     → client.rs (build absolute URI, send, bounded by timeout)
//!     → UpstreamResponse (status + headers + body)
//!       or TransportError (refused / DNS / timeout)
//! ```
//!
//! # Design Decisions
//! - One shared hyper client; per-call timeout, not per-client
//! - HTTP error statuses (404, 500, ...) are valid responses, never
//!   TransportError; callers interpret them
//! - Bodies are opaque bytes; nothing here parses JSON

pub mod client;
pub mod target;

pub use client::{TransportError, UpstreamClient, UpstreamResponse};
pub use target::{UpstreamSet, UpstreamTarget};
