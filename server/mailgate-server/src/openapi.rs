//! OpenAPI documentation for the gateway API

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::routes::paths;
use crate::server::MailGateServer;

/// The gateway's OpenAPI document
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MailGate API",
        description = "Authenticated outbound-email gateway: quota-gated sends, \
                       recipient policy filtering and an owner-pageable audit log."
    ),
    paths(
        crate::handlers::health::health_check,
        crate::handlers::access::request_send_mail_access,
        crate::handlers::send::send_mail,
        crate::handlers::send::send_mail_external,
        crate::handlers::sendbox::list_sendbox,
    ),
    components(schemas(
        crate::handlers::StatusResponse,
        crate::handlers::health::HealthResponse,
        crate::handlers::send::ExternalSendMailRequest,
        crate::handlers::sendbox::SendboxResponse,
        crate::services::SendMailRequest,
        database_layer::SendRecord,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "mailer", description = "Send access, sends and audit history")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create API documentation routes
pub fn create_docs_routes() -> Router<MailGateServer> {
    Router::new().route(paths::docs::OPENAPI_JSON, get(openapi_json))
}
