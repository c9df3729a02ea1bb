//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the API gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Base addresses of the three upstream services.
    pub upstreams: UpstreamsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Base addresses of the upstream services.
///
/// Trailing slashes are stripped during loading so that base + request
/// path concatenation stays verbatim.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamsConfig {
    /// Auth/user service base address.
    pub auth: String,

    /// Route service base address.
    pub route: String,

    /// Subscription/trip service base address.
    pub subscription: String,
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            auth: "http://localhost:3001".to_string(),
            route: "http://localhost:3002".to_string(),
            subscription: "http://localhost:3003".to_string(),
        }
    }
}

/// Timeout configuration for outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Timeout for transparent proxying and the final FK-gate
    /// delegation, in seconds.
    pub proxy_secs: u64,

    /// Timeout for health probes, existence probes, and dashboard
    /// fetches, in seconds.
    pub probe_secs: u64,

    /// Whole-request deadline enforced at the gateway edge, in seconds.
    /// Must exceed `proxy_secs` so upstream timeouts surface as
    /// structured 502 bodies rather than a bare edge timeout.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            proxy_secs: 30,
            probe_secs: 10,
            request_secs: 35,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
