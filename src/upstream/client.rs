//! Shared HTTP client for outbound upstream calls.
//!
//! # Responsibilities
//! - Build the absolute URI: base address + inbound path-and-query verbatim
//! - Send with a hard per-call timeout
//! - Buffer the response into status + headers + body
//! - Classify connect/DNS/timeout failures as TransportError
//!
//! # Design Decisions
//! - No path rewriting, no trailing-slash normalization at call time
//! - HTTP error statuses are successful calls; only transport-level
//!   failures become Err
//! - No retries anywhere; a failed attempt is terminal for that request

use std::time::Duration;

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::upstream::target::UpstreamTarget;

/// Cap on buffered bodies, both directions.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Transport-level failure reaching or reading an upstream.
///
/// Distinct from an HTTP error status, which is a valid response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {target} timed out after {timeout:?}")]
    Timeout { target: String, timeout: Duration },

    #[error("connection to {target} failed: {message}")]
    Connect { target: String, message: String },

    #[error("invalid upstream uri {uri}")]
    InvalidUri { uri: String },

    #[error("failed to read response body from {target}: {message}")]
    Body { target: String, message: String },
}

/// Buffered upstream response, immutable once returned.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Shared outbound HTTP client. Cheap to clone.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
}

impl UpstreamClient {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }

    /// Issue one HTTP call to `target`, bounded by `timeout`.
    ///
    /// `path_and_query` is forwarded verbatim after the target's base
    /// address. Headers are sent as given; callers strip `host` before
    /// calling when forwarding an inbound request.
    pub async fn call(
        &self,
        target: &UpstreamTarget,
        method: Method,
        path_and_query: &str,
        headers: &HeaderMap,
        body: Bytes,
        timeout: Duration,
    ) -> Result<UpstreamResponse, TransportError> {
        let uri_string = format!("{}{}", target.base_address, path_and_query);

        let mut builder = Request::builder().method(method).uri(uri_string.as_str());
        if let Some(out_headers) = builder.headers_mut() {
            for (name, value) in headers.iter() {
                out_headers.insert(name.clone(), value.clone());
            }
        }

        let request = builder
            .body(Body::from(body))
            .map_err(|_| TransportError::InvalidUri { uri: uri_string.clone() })?;

        let send = async {
            let response =
                self.client
                    .request(request)
                    .await
                    .map_err(|e| TransportError::Connect {
                        target: target.name.to_string(),
                        message: e.to_string(),
                    })?;

            let (parts, body) = response.into_parts();
            let bytes = to_bytes(Body::new(body), MAX_BODY_BYTES)
                .await
                .map_err(|e| TransportError::Body {
                    target: target.name.to_string(),
                    message: e.to_string(),
                })?;

            Ok(UpstreamResponse {
                status: parts.status,
                headers: parts.headers,
                body: bytes,
            })
        };

        match tokio::time::timeout(timeout, send).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout {
                target: target.name.to_string(),
                timeout,
            }),
        }
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}
