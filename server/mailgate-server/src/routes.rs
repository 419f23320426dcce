pub mod paths;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{access, health, send, sendbox},
    openapi,
    server::MailGateServer,
};

/// Create health check routes
pub fn health_routes() -> Router<MailGateServer> {
    Router::new().route(paths::health::HEALTH, get(health::health_check))
}

/// Create session-identity mailer routes
pub fn mailer_routes() -> Router<MailGateServer> {
    Router::new()
        .route(
            paths::mailer::REQUEST_ACCESS,
            post(access::request_send_mail_access),
        )
        .route(paths::mailer::SEND_MAIL, post(send::send_mail))
        .route(paths::mailer::SENDBOX, get(sendbox::list_sendbox))
}

/// Create bearer-identity routes for upstream relays
pub fn external_routes() -> Router<MailGateServer> {
    Router::new().route(paths::external::SEND_MAIL, post(send::send_mail_external))
}

/// Create all application routes
pub fn create_routes() -> Router<MailGateServer> {
    Router::new()
        // Health check routes (no authentication required)
        .merge(health_routes())
        // API documentation routes
        .merge(openapi::create_docs_routes())
        // Gateway API
        .merge(mailer_routes())
        .merge(external_routes())
}
