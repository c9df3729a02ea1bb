//! Multi-source dashboard aggregation.
//!
//! # Responsibilities
//! - Resolve the caller's identity from the auth service
//! - Fan out the three dependent fetches concurrently
//! - Combine results, or fail as one unit

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Response, StatusCode};
use serde_json::{json, Value};

use crate::http::request::X_REQUEST_ID;
use crate::http::response;
use crate::upstream::{TransportError, UpstreamClient, UpstreamResponse, UpstreamSet};

/// Build the commuter dashboard for the caller identified by the
/// bearer token. Every outbound call is bounded by `timeout`.
pub async fn build_dashboard(
    client: &UpstreamClient,
    targets: &UpstreamSet,
    headers: &HeaderMap,
    timeout: Duration,
) -> Response<Body> {
    let token_present = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);

    if !token_present {
        return response::error_response(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Authorization token is required",
        );
    }

    let fwd_headers = forward_headers(headers);

    // Identity is a genuine dependency: the fan-out never starts if
    // this fetch fails.
    let profile = client
        .call(
            &targets.auth,
            Method::GET,
            "/api/auth/me",
            &fwd_headers,
            Bytes::new(),
            timeout,
        )
        .await;

    let user = match success_body(&profile) {
        Some(user) => user,
        None => {
            tracing::warn!("Dashboard aborted: profile fetch failed");
            return dashboard_failed();
        }
    };

    let user_id = match identity(&user) {
        Some(id) => id,
        None => {
            tracing::warn!("Dashboard aborted: profile carries no id/userId");
            return dashboard_failed();
        }
    };

    let subscriptions_path = format!("/api/subscriptions/user/{}", user_id);
    let trips_path = format!("/api/trips?userId={}", user_id);

    let (subscriptions, routes, trips) = tokio::join!(
        client.call(
            &targets.subscription,
            Method::GET,
            &subscriptions_path,
            &fwd_headers,
            Bytes::new(),
            timeout,
        ),
        client.call(
            &targets.route,
            Method::GET,
            "/api/routes",
            &fwd_headers,
            Bytes::new(),
            timeout,
        ),
        client.call(
            &targets.subscription,
            Method::GET,
            &trips_path,
            &fwd_headers,
            Bytes::new(),
            timeout,
        ),
    );

    // All-or-nothing: one failed leg discards everything.
    match (
        success_body(&subscriptions),
        success_body(&routes),
        success_body(&trips),
    ) {
        (Some(subscriptions), Some(routes), Some(trips)) => response::json_response(
            StatusCode::OK,
            json!({
                "user": user,
                "subscriptions": subscriptions,
                "routes": routes,
                "trips": trips,
            }),
        ),
        (subscriptions, routes, trips) => {
            tracing::warn!(
                subscriptions_ok = subscriptions.is_some(),
                routes_ok = routes.is_some(),
                trips_ok = trips.is_some(),
                "Dashboard aggregation failed"
            );
            dashboard_failed()
        }
    }
}

fn dashboard_failed() -> Response<Body> {
    response::error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "DASHBOARD_FAILED",
        "Failed to aggregate dashboard data",
    )
}

/// Extract the JSON body of a successful (2xx) call. An error status,
/// transport failure, or unparseable body is a failure.
fn success_body(result: &Result<UpstreamResponse, TransportError>) -> Option<Value> {
    match result {
        Ok(response) if response.status.is_success() => {
            serde_json::from_slice(&response.body).ok()
        }
        _ => None,
    }
}

/// Identity field of a profile: `id` preferred, fallback `userId`.
fn identity(user: &Value) -> Option<String> {
    let id = user.get("id").or_else(|| user.get("userId"))?;
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Headers carried by every dashboard fetch: the caller's token plus
/// the request ID for correlation.
fn forward_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(authorization) = inbound.get(header::AUTHORIZATION) {
        headers.insert(header::AUTHORIZATION, authorization.clone());
    }
    if let Some(request_id) = inbound.get(X_REQUEST_ID) {
        headers.insert(X_REQUEST_ID, request_id.clone());
    }
    headers
}
