//! MailGate Server - authenticated outbound-email gateway API
//!
//! This library provides the HTTP surface of the gateway: send-access
//! enrollment, the quota-gated send pipeline for session and bearer
//! identities, and the owner-scoped audit history.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use error::*;
pub use server::{MailGateServer, ServerConfig};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: MailGateServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer()),
        )
        .with_state(server)
}
