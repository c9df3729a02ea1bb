//! Upstream target identity.
//!
//! # Responsibilities
//! - Name the three backend services the gateway fronts
//! - Hold their base addresses, fixed at startup
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Trailing slashes stripped so base + path concatenation is verbatim

use crate::config::UpstreamsConfig;

/// One backend service the gateway forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    /// Service identifier for logging/metrics.
    pub name: &'static str,

    /// Base address, scheme + authority, no trailing slash
    /// (e.g., "http://localhost:3001").
    pub base_address: String,
}

impl UpstreamTarget {
    pub fn new(name: &'static str, base_address: impl Into<String>) -> Self {
        let base = base_address.into();
        Self {
            name,
            base_address: base.trim_end_matches('/').to_string(),
        }
    }
}

/// The three upstream targets, built once from configuration.
#[derive(Debug, Clone)]
pub struct UpstreamSet {
    pub auth: UpstreamTarget,
    pub route: UpstreamTarget,
    pub subscription: UpstreamTarget,
}

impl UpstreamSet {
    pub fn from_config(config: &UpstreamsConfig) -> Self {
        Self {
            auth: UpstreamTarget::new("auth", config.auth.clone()),
            route: UpstreamTarget::new("route", config.route.clone()),
            subscription: UpstreamTarget::new("subscription", config.subscription.clone()),
        }
    }
}
