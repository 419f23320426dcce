use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::server::MailGateServer;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service status
    #[schema(example = "healthy")]
    pub status: String,
    /// Server version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Whether the database answered the probe
    pub database: bool,
}

/// Service liveness and database probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
pub async fn health_check(State(server): State<MailGateServer>) -> Json<HealthResponse> {
    let database = server.db.is_healthy().await;

    Json(HealthResponse {
        status: if database { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}
