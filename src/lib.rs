//! Commuter API gateway.
//!
//! Unifies three backend services (auth, route, subscription) behind a
//! single HTTP surface.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                  GATEWAY                       │
//!   Client Request   │  ┌────────┐    ┌──────────────────────────┐   │
//!   ─────────────────┼─▶│  http  │───▶│ component by path prefix │   │
//!                    │  │ server │    │  proxy / health / gate / │   │
//!                    │  └────────┘    │  dashboard               │   │
//!                    │                └────────────┬─────────────┘   │
//!                    │                             │                  │
//!                    │                             ▼                  │
//!   Client Response  │  ┌──────────┐      ┌──────────────┐           │       auth
//!   ◀────────────────┼──│ response │◀─────│   upstream   │◀──────────┼────── route
//!                    │  │ rebuild  │      │    client    │           │       subscription
//!                    │  └──────────┘      └──────────────┘           │
//!                    │                                                │
//!                    │  Cross-cutting: config, observability          │
//!                    └───────────────────────────────────────────────┘
//! ```
//!
//! No component depends on another except through the upstream client;
//! the three upstream targets are immutable, process-wide configuration.

// Core subsystems
pub mod config;
pub mod http;
pub mod upstream;

// Request components
pub mod dashboard;
pub mod health;
pub mod proxy;
pub mod subscriptions;

// Cross-cutting concerns
pub mod observability;

pub use config::GatewayConfig;
pub use http::GatewayServer;
