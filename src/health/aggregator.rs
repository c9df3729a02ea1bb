//! Parallel health aggregation across the upstream trio.
//!
//! # Responsibilities
//! - Probe each upstream's /health concurrently
//! - Bound every probe by its own timeout
//! - Report up/down per service without failing the aggregate

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, Method};
use serde::Serialize;

use crate::observability::metrics;
use crate::upstream::{UpstreamClient, UpstreamSet, UpstreamTarget};

/// Liveness of a single upstream as seen from the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Up,
    Down,
}

/// Unified liveness report over all three upstreams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub auth: ServiceStatus,
    pub route: ServiceStatus,
    pub subscription: ServiceStatus,
}

/// Probe all upstreams concurrently and collect every outcome.
///
/// Total latency is bounded by the slowest probe, not their sum. A
/// probe failure marks that service down and nothing else.
pub async fn check_all(
    client: &UpstreamClient,
    targets: &UpstreamSet,
    timeout: Duration,
) -> HealthReport {
    let (auth, route, subscription) = tokio::join!(
        probe(client, &targets.auth, timeout),
        probe(client, &targets.route, timeout),
        probe(client, &targets.subscription, timeout),
    );

    HealthReport {
        auth,
        route,
        subscription,
    }
}

/// One /health probe. Transport-level completion counts as up; the
/// probe's HTTP status code is deliberately ignored.
async fn probe(
    client: &UpstreamClient,
    target: &UpstreamTarget,
    timeout: Duration,
) -> ServiceStatus {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static("commuter-gateway-health"),
    );

    let status = match client
        .call(target, Method::GET, "/health", &headers, Bytes::new(), timeout)
        .await
    {
        Ok(response) => {
            tracing::debug!(
                service = target.name,
                status = response.status.as_u16(),
                "Health probe completed"
            );
            ServiceStatus::Up
        }
        Err(e) => {
            tracing::warn!(service = target.name, error = %e, "Health probe failed");
            ServiceStatus::Down
        }
    };

    metrics::record_upstream_health(target.name, status == ServiceStatus::Up);
    status
}
