use axum::{
    extract::{Query, State},
    Json,
};
use database_layer::SendRecord;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::middleware::AuthContext;
use crate::server::MailGateServer;
use crate::services::sendbox;

/// Query parameters for audit log paging
#[derive(Debug, Deserialize, IntoParams)]
pub struct SendboxQuery {
    /// Page size, 1 to 100
    #[param(example = 20, minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
    /// Records to skip, newest first
    #[param(example = 0, minimum = 0)]
    pub offset: Option<i64>,
}

/// One page of the caller's send history
#[derive(Debug, Serialize, ToSchema)]
pub struct SendboxResponse {
    /// Audit records, newest first
    pub results: Vec<SendRecord>,
    /// Total record count on the first page, sentinel 0 afterwards
    #[schema(example = 42)]
    pub count: i64,
}

/// Page through the authenticated address's send history
#[utoipa::path(
    get,
    path = "/api/sendbox",
    tag = "mailer",
    params(SendboxQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Audit records", body = SendboxResponse),
        (status = 400, description = "Invalid limit, offset or missing address"),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn list_sendbox(
    State(server): State<MailGateServer>,
    Query(query): Query<SendboxQuery>,
    auth: AuthContext,
) -> Result<Json<SendboxResponse>, ApiError> {
    let page = sendbox::fetch_page(
        &server.audit,
        &auth.address,
        query.limit.unwrap_or(20),
        query.offset.unwrap_or(0),
    )
    .await?;

    Ok(Json(SendboxResponse {
        results: page.results,
        count: page.count,
    }))
}
