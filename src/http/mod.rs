//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route table, dispatch)
//!     → request.rs (request ID injection)
//!     → [component produces or forwards a response]
//!     → response.rs (allow-list filter, structured bodies)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::GatewayServer;
