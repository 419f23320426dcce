use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::tokens;
use crate::error::ApiError;
use crate::handlers::StatusResponse;
use crate::middleware::{AuthContext, RequestContext};
use crate::server::MailGateServer;
use crate::services::SendMailRequest;

/// External send request: the sender token rides in the body
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExternalSendMailRequest {
    /// Signed sender token
    pub token: Option<String>,
    #[serde(flatten)]
    pub mail: SendMailRequest,
}

/// Send one mail as the session identity
#[utoipa::path(
    post,
    path = "/api/send_mail",
    tag = "mailer",
    security(("bearer_auth" = [])),
    request_body = SendMailRequest,
    responses(
        (status = 200, description = "Mail sent", body = StatusResponse),
        (status = 400, description = "Rejected before dispatch (balance, fields, block list)"),
        (status = 401, description = "Unauthenticated"),
        (status = 500, description = "Delivery failed")
    )
)]
pub async fn send_mail(
    State(server): State<MailGateServer>,
    auth: AuthContext,
    Json(request): Json<SendMailRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    server
        .pipeline
        .execute(&auth.address, &request, auth.request.remote_addr.as_deref())
        .await?;
    Ok(Json(StatusResponse::ok()))
}

/// Send one mail as an out-of-band token identity.
///
/// Upstream relays (the SMTP proxy) authenticate per request with a
/// signed token in the body; any verification failure is one opaque 401
/// and nothing is read from the stores.
#[utoipa::path(
    post,
    path = "/external/api/send_mail",
    tag = "mailer",
    request_body = ExternalSendMailRequest,
    responses(
        (status = 200, description = "Mail sent", body = StatusResponse),
        (status = 400, description = "Rejected before dispatch (balance, fields, block list)"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Delivery failed")
    )
)]
pub async fn send_mail_external(
    State(server): State<MailGateServer>,
    context: RequestContext,
    Json(request): Json<ExternalSendMailRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let token = request
        .token
        .as_deref()
        .ok_or_else(|| ApiError::authentication("Unauthorized"))?;
    let claims = tokens::verify_sender_token(token, &tokens::token_secret_from_env())?;

    server
        .pipeline
        .execute(&claims.address, &request.mail, context.remote_addr.as_deref())
        .await?;
    Ok(Json(StatusResponse::ok()))
}
