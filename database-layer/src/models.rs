// Row models for the ledger and audit stores
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// One enrolled sender identity and its remaining send quota.
///
/// `enabled` is derived from the initial balance at creation time and is
/// never recomputed on later debits. An account funded after creation at
/// balance 0 stays disabled.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct SenderAccount {
    pub address: String,
    pub balance: i64,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// One append-only audit entry for a send attempt.
///
/// `mail` is the redacted envelope copy; `id` is the retrieval order
/// (newest first).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct SendRecord {
    pub id: i64,
    pub address: String,
    #[schema(value_type = Object)]
    pub mail: Value,
    pub created_at: DateTime<Utc>,
}
