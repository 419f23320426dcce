// Append-only audit log of send attempts
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

use crate::error::DatabaseResult;
use crate::models::SendRecord;

/// Repository for the send audit log
#[derive(Debug, Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one audit record for an address
    pub async fn insert_record(&self, address: &str, mail: &Value) -> DatabaseResult<SendRecord> {
        let record = sqlx::query_as::<_, SendRecord>(
            r#"
            INSERT INTO send_records (address, mail)
            VALUES ($1, $2)
            RETURNING id, address, mail, created_at
            "#,
        )
        .bind(address)
        .bind(mail)
        .fetch_one(&self.pool)
        .await?;

        debug!(address = %address, id = record.id, "Audit record stored");
        Ok(record)
    }

    /// Page through an address's records, newest first
    pub async fn list_records(
        &self,
        address: &str,
        limit: i64,
        offset: i64,
    ) -> DatabaseResult<Vec<SendRecord>> {
        let records = sqlx::query_as::<_, SendRecord>(
            r#"
            SELECT id, address, mail, created_at
            FROM send_records
            WHERE address = $1
            ORDER BY id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(address)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Total number of records for an address
    pub async fn count_records(&self, address: &str) -> DatabaseResult<i64> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM send_records
            WHERE address = $1
            "#,
        )
        .bind(address)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
