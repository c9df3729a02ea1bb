//! Transparent proxying subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (method, path+query, headers, body)
//!     → dispatcher.rs (strip host, forward verbatim)
//!     → UpstreamClient (proxy timeout)
//!     → success: verbatim status + allow-listed headers + body
//!     → transport failure: 502 DOWNSTREAM_ERROR
//! ```
//!
//! # Design Decisions
//! - No retries; a failed attempt is terminal for that request
//! - Upstream 4xx/5xx statuses pass through unmodified

pub mod dispatcher;

pub use dispatcher::forward;
