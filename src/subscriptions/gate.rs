//! Foreign-key validation gate for subscription creation.
//!
//! # Responsibilities
//! - Reject requests missing userId/routeId/semester before any network call
//! - Run both existence probes concurrently, each timeout-bounded
//! - Apply the fixed precedence from outcome.rs
//! - On success, delegate the original request to the subscription service

use std::time::{Duration, Instant};

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Response, StatusCode};
use serde_json::{json, Value};

use crate::http::request::X_REQUEST_ID;
use crate::http::response;
use crate::subscriptions::outcome::{resolve, ProbeOutcome, ValidationOutcome};
use crate::upstream::{UpstreamClient, UpstreamSet};

/// Fields a subscription request must carry.
const REQUIRED_FIELDS: [&str; 3] = ["userId", "routeId", "semester"];

/// Validate and create a subscription.
///
/// `probe_timeout` bounds each existence probe; `proxy_timeout` bounds
/// the final delegation.
pub async fn create_subscription(
    client: &UpstreamClient,
    targets: &UpstreamSet,
    headers: &HeaderMap,
    body: Bytes,
    probe_timeout: Duration,
    proxy_timeout: Duration,
) -> Response<Body> {
    let parsed: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !is_present(parsed.get(field)))
        .collect();

    if !missing.is_empty() {
        tracing::debug!(missing = ?missing, "Subscription request rejected before validation");
        return response::json_response(
            StatusCode::BAD_REQUEST,
            json!({
                "error": "VALIDATION_ERROR",
                "message": format!("Missing required fields: {}", missing.join(", ")),
                "fields": missing,
            }),
        );
    }

    let user_id = parsed["userId"].clone();
    let route_id = parsed["routeId"].clone();

    let probe_headers = probe_headers(headers);
    let user_path = format!("/api/users/{}", path_segment(&user_id));
    let route_path = format!("/api/routes/{}", path_segment(&route_id));

    let started = Instant::now();

    // Both probes run to completion regardless of each other's outcome;
    // elapsed time is the max of the two, not the sum.
    let (user_result, route_result) = tokio::join!(
        client.call(
            &targets.auth,
            Method::GET,
            &user_path,
            &probe_headers,
            Bytes::new(),
            probe_timeout,
        ),
        client.call(
            &targets.route,
            Method::GET,
            &route_path,
            &probe_headers,
            Bytes::new(),
            probe_timeout,
        ),
    );

    let elapsed_ms = started.elapsed().as_millis() as u64;
    let outcome = resolve(
        ProbeOutcome::from_result(&user_result),
        &user_id,
        ProbeOutcome::from_result(&route_result),
        &route_id,
    );

    match outcome {
        ValidationOutcome::NotFound { field, value } => {
            tracing::info!(field, value = %value, elapsed_ms, "Foreign key violation");
            response::json_response(
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "FOREIGN_KEY_VIOLATION",
                    "message": format!("Referenced {} does not exist", field),
                    "field": field,
                    "value": value,
                    "validationTimeMs": elapsed_ms,
                }),
            )
        }
        ValidationOutcome::ServiceUnavailable { service } => {
            tracing::warn!(service, elapsed_ms, "Validation dependency unavailable");
            response::json_response(
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "error": "SERVICE_UNAVAILABLE",
                    "message": format!("{} is unavailable, cannot validate subscription", service),
                    "service": service,
                }),
            )
        }
        ValidationOutcome::Valid => delegate(client, targets, headers, body, proxy_timeout).await,
    }
}

/// Forward the original POST to the subscription service once
/// validation has passed.
async fn delegate(
    client: &UpstreamClient,
    targets: &UpstreamSet,
    headers: &HeaderMap,
    body: Bytes,
    timeout: Duration,
) -> Response<Body> {
    let mut outbound = headers.clone();
    outbound.remove(header::HOST);

    match client
        .call(
            &targets.subscription,
            Method::POST,
            "/api/subscriptions",
            &outbound,
            body,
            timeout,
        )
        .await
    {
        Ok(upstream) => {
            tracing::debug!(status = upstream.status.as_u16(), "Subscription delegated");
            response::passthrough(upstream)
        }
        Err(e) => {
            tracing::error!(error = %e, "Subscription delegation failed after validation passed");
            response::error_response(
                StatusCode::BAD_GATEWAY,
                "COMPOSITE_ERROR",
                "Validation succeeded but subscription creation failed",
            )
        }
    }
}

/// Headers carried by the existence probes: the caller's authorization
/// if present, plus the request ID for correlation.
fn probe_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(authorization) = inbound.get(header::AUTHORIZATION) {
        headers.insert(header::AUTHORIZATION, authorization.clone());
    }
    if let Some(request_id) = inbound.get(X_REQUEST_ID) {
        headers.insert(X_REQUEST_ID, request_id.clone());
    }
    headers
}

/// Presence check with dynamic-language truthiness: absent, null, "",
/// 0, and false all fail.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(_) => true,
    }
}

/// Render an identifier value as a URL path segment.
fn path_segment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
