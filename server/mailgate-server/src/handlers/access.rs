use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::handlers::StatusResponse;
use crate::middleware::AuthContext;
use crate::server::MailGateServer;
use crate::services::enrollment;

/// Request send access for the authenticated address
#[utoipa::path(
    post,
    path = "/api/request_send_mail_access",
    tag = "mailer",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Access granted", body = StatusResponse),
        (status = 400, description = "Missing address or already requested"),
        (status = 401, description = "Unauthenticated"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn request_send_mail_access(
    State(server): State<MailGateServer>,
    auth: AuthContext,
) -> Result<Json<StatusResponse>, ApiError> {
    enrollment::enroll(&server.ledger, &auth.address, server.config.default_balance).await?;
    Ok(Json(StatusResponse::ok()))
}
