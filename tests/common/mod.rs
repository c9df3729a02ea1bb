//! Shared utilities for integration testing.
//!
//! Mock upstreams are real axum servers on ephemeral ports so bodies,
//! headers, and query strings can be asserted end to end.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::Router;
use tokio::net::TcpListener;

use commuter_gateway::config::GatewayConfig;
use commuter_gateway::GatewayServer;

/// Serve a mock upstream router on an ephemeral port.
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

/// An address with nothing listening on it, for simulating an
/// unreachable upstream (connection refused).
pub fn unreachable_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Counts every request reaching a mock upstream, for the
/// "zero network calls" assertions.
#[derive(Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Wrap a mock upstream router so every request increments `counter`.
pub fn counted(router: Router, counter: CallCounter) -> Router {
    router.layer(axum::middleware::from_fn(
        move |request: Request, next: Next| {
            let counter = counter.clone();
            async move {
                counter.0.fetch_add(1, Ordering::SeqCst);
                next.run(request).await
            }
        },
    ))
}

/// Spawn the gateway fronting the three given upstream addresses.
/// Timeouts are shortened so failure tests stay fast.
pub async fn spawn_gateway(
    auth: SocketAddr,
    route: SocketAddr,
    subscription: SocketAddr,
) -> SocketAddr {
    let mut config = GatewayConfig::default();
    config.upstreams.auth = format!("http://{}", auth);
    config.upstreams.route = format!("http://{}", route);
    config.upstreams.subscription = format!("http://{}", subscription);
    config.timeouts.probe_secs = 2;
    config.timeouts.proxy_secs = 5;
    config.timeouts.request_secs = 10;

    let server = GatewayServer::new(config);
    let router = server.router();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}
