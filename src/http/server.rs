//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the gateway's route table
//! - Wire up middleware (tracing, edge timeout, request ID)
//! - Bind the server to a listener with graceful shutdown
//! - Dispatch each request to its component: transparent proxy,
//!   health aggregator, FK validation gate, or dashboard aggregator

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Request, Response, StatusCode},
    response::IntoResponse,
    routing::{any, get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{GatewayConfig, TimeoutConfig};
use crate::dashboard;
use crate::health;
use crate::http::request::{request_id, RequestIdLayer};
use crate::http::response;
use crate::observability::metrics;
use crate::proxy;
use crate::subscriptions;
use crate::upstream::{client::MAX_BODY_BYTES, UpstreamClient, UpstreamSet, UpstreamTarget};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub targets: Arc<UpstreamSet>,
    pub client: UpstreamClient,
    pub timeouts: TimeoutConfig,
}

impl AppState {
    fn proxy_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.proxy_secs)
    }

    fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.probe_secs)
    }
}

/// HTTP server for the API gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new gateway server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let state = AppState {
            targets: Arc::new(UpstreamSet::from_config(&config.upstreams)),
            client: UpstreamClient::new(),
            timeouts: config.timeouts.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router: the full route table plus middleware.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/api/commuter/dashboard", get(dashboard_handler))
            // POST goes through the FK gate; every other method on the
            // bare path is transparently proxied.
            .route(
                "/api/subscriptions",
                post(create_subscription_handler).fallback(subscription_proxy_handler),
            )
            .route("/api/subscriptions/{*rest}", any(subscription_proxy_handler))
            .route("/api/trips", any(subscription_proxy_handler))
            .route("/api/trips/{*rest}", any(subscription_proxy_handler))
            .route("/api/auth", any(auth_proxy_handler))
            .route("/api/auth/{*rest}", any(auth_proxy_handler))
            .route("/api/users", any(auth_proxy_handler))
            .route("/api/users/{*rest}", any(auth_proxy_handler))
            .route("/api/routes", any(route_proxy_handler))
            .route("/api/routes/{*rest}", any(route_proxy_handler))
            .fallback(not_found_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(RequestIdLayer)
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The built router; used by integration tests to serve on an
    /// ephemeral listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            auth = %self.config.upstreams.auth,
            route = %self.config.upstreams.route,
            subscription = %self.config.upstreams.subscription,
            "Gateway starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Gateway stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// GET /health: probe all upstreams concurrently.
///
/// Always 200 with `status: "ok"`, even when every upstream is down.
/// This is a liveness summary of the gateway, not a readiness gate.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let report = health::check_all(&state.client, &state.targets, state.probe_timeout()).await;

    metrics::record_request("GET", 200, "health", start);
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "services": report,
        })),
    )
}

/// GET /api/commuter/dashboard: identity fetch then three-way fan-out.
async fn dashboard_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response<Body> {
    let start = Instant::now();
    let response = dashboard::build_dashboard(
        &state.client,
        &state.targets,
        request.headers(),
        state.probe_timeout(),
    )
    .await;

    metrics::record_request("GET", response.status().as_u16(), "dashboard", start);
    response
}

/// POST /api/subscriptions: FK-validated creation.
async fn create_subscription_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response<Body> {
    let start = Instant::now();
    let (parts, body) = request.into_parts();

    let body_bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => return payload_too_large("POST", "subscription", start),
    };

    let response = subscriptions::create_subscription(
        &state.client,
        &state.targets,
        &parts.headers,
        body_bytes,
        state.probe_timeout(),
        state.proxy_timeout(),
    )
    .await;

    metrics::record_request("POST", response.status().as_u16(), "subscription", start);
    response
}

async fn auth_proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let target = state.targets.auth.clone();
    proxy_to(state, target, request).await
}

async fn route_proxy_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response<Body> {
    let target = state.targets.route.clone();
    proxy_to(state, target, request).await
}

async fn subscription_proxy_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response<Body> {
    let target = state.targets.subscription.clone();
    proxy_to(state, target, request).await
}

/// Transparent proxy path shared by the three proxied prefixes.
async fn proxy_to(state: AppState, target: UpstreamTarget, request: Request<Body>) -> Response<Body> {
    let start = Instant::now();
    let id = request_id(request.headers()).to_string();
    let method = request.method().clone();
    let method_str = method.to_string();
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    tracing::debug!(
        request_id = %id,
        method = %method,
        path = %path_and_query,
        target = target.name,
        "Proxying request"
    );

    let (parts, body) = request.into_parts();
    let body_bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => return payload_too_large(&method_str, target.name, start),
    };

    let response = proxy::forward(
        &state.client,
        &target,
        method,
        &path_and_query,
        &parts.headers,
        body_bytes,
        state.proxy_timeout(),
    )
    .await;

    metrics::record_request(&method_str, response.status().as_u16(), target.name, start);
    response
}

fn payload_too_large(method: &str, target: &str, start: Instant) -> Response<Body> {
    metrics::record_request(method, 413, target, start);
    response::error_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        "PAYLOAD_TOO_LARGE",
        "Request body exceeds the gateway limit",
    )
}

/// Router-level 404 for unmatched prefixes.
async fn not_found_handler(request: Request<Body>) -> Response<Body> {
    tracing::debug!(path = %request.uri().path(), "No route matched");
    response::error_response(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        "No matching route for this path",
    )
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
