//! Response handling and transformation.
//!
//! # Responsibilities
//! - Rebuild an upstream response for the client
//! - Republish only the allow-listed headers
//! - Render the structured error bodies of the gateway's taxonomy
//!
//! # Design Decisions
//! - Allow-list instead of hop-by-hop deny-list: transport framing
//!   headers (content-length, transfer-encoding, connection) from the
//!   upstream must never conflict with the gateway's own framing
//! - Every error body carries a machine-readable `error` code and a
//!   human `message`

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, Response, StatusCode};
use axum::response::IntoResponse;
use serde_json::{json, Value};

/// Upstream response headers republished to the client. Everything
/// else is dropped.
pub const HEADER_ALLOW_LIST: [HeaderName; 4] = [
    header::ETAG,
    header::LOCATION,
    header::LINK,
    header::CONTENT_TYPE,
];

/// Rebuild an upstream response: verbatim status and body, headers
/// filtered through the allow-list.
pub fn passthrough(upstream: crate::upstream::UpstreamResponse) -> Response<Body> {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;

    let headers = response.headers_mut();
    for name in HEADER_ALLOW_LIST {
        for value in upstream.headers.get_all(&name) {
            headers.append(name.clone(), value.clone());
        }
    }

    response
}

/// Filter a header map through the allow-list. Exposed for tests.
pub fn filter_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::new();
    for name in HEADER_ALLOW_LIST {
        for value in upstream.get_all(&name) {
            filtered.append(name.clone(), value.clone());
        }
    }
    filtered
}

/// Structured error response: `{error, message}`.
pub fn error_response(status: StatusCode, code: &str, message: &str) -> Response<Body> {
    json_response(
        status,
        json!({
            "error": code,
            "message": message,
        }),
    )
}

/// JSON response with an explicit status. Error bodies built through
/// here carry extra fields (field/value/service) beyond the code.
pub fn json_response(status: StatusCode, body: Value) -> Response<Body> {
    (status, axum::Json(body)).into_response()
}
