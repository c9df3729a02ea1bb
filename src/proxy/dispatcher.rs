//! Transparent proxy dispatcher.
//!
//! # Responsibilities
//! - Forward an inbound request verbatim to one upstream target
//! - Remove the hop-only `host` header before sending
//! - Republish the upstream status and allow-listed headers
//! - Map transport failure to a gateway 502

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Response, StatusCode};

use crate::http::response;
use crate::upstream::{UpstreamClient, UpstreamTarget};

/// Forward one inbound request to `target` and rebuild the response.
///
/// The method, path-and-query, and body are sent byte-for-byte; only
/// the `host` header is removed so the upstream sees its own origin.
pub async fn forward(
    client: &UpstreamClient,
    target: &UpstreamTarget,
    method: Method,
    path_and_query: &str,
    headers: &HeaderMap,
    body: Bytes,
    timeout: Duration,
) -> Response<Body> {
    let mut outbound = headers.clone();
    outbound.remove(header::HOST);

    match client
        .call(target, method, path_and_query, &outbound, body, timeout)
        .await
    {
        Ok(upstream) => {
            tracing::debug!(
                target = target.name,
                status = upstream.status.as_u16(),
                path = path_and_query,
                "Forwarded request"
            );
            response::passthrough(upstream)
        }
        Err(e) => {
            tracing::error!(
                target = target.name,
                path = path_and_query,
                error = %e,
                "Upstream transport failure"
            );
            response::error_response(
                StatusCode::BAD_GATEWAY,
                "DOWNSTREAM_ERROR",
                &format!("{} service is unreachable", target.name),
            )
        }
    }
}
