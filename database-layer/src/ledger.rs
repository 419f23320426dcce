use sqlx::PgPool;
use tracing::debug;

use crate::error::{DatabaseError, DatabaseResult};
use crate::models::SenderAccount;

/// Repository for sender account (quota ledger) operations
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a sender account with an initial balance.
    ///
    /// A duplicate address surfaces as `DatabaseError::UniqueViolation`;
    /// the unique constraint is the only duplicate check.
    pub async fn create_account(
        &self,
        address: &str,
        balance: i64,
        enabled: bool,
    ) -> DatabaseResult<SenderAccount> {
        let account = sqlx::query_as::<_, SenderAccount>(
            r#"
            INSERT INTO sender_accounts (address, balance, enabled)
            VALUES ($1, $2, $3)
            RETURNING address, balance, enabled, created_at
            "#,
        )
        .bind(address)
        .bind(balance)
        .bind(enabled)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_sqlx)?;

        Ok(account)
    }

    /// Fetch an account by address
    pub async fn get_account(&self, address: &str) -> DatabaseResult<Option<SenderAccount>> {
        let account = sqlx::query_as::<_, SenderAccount>(
            r#"
            SELECT address, balance, enabled, created_at
            FROM sender_accounts
            WHERE address = $1
            "#,
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Decrement the balance by one, conditionally.
    ///
    /// The `balance > 0` guard keeps the ledger floor at zero under
    /// concurrent sends; returns the number of rows actually updated so
    /// the caller can observe a lost race as zero rows.
    pub async fn debit(&self, address: &str) -> DatabaseResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE sender_accounts
            SET balance = balance - 1
            WHERE address = $1 AND balance > 0
            "#,
        )
        .bind(address)
        .execute(&self.pool)
        .await?;

        debug!(address = %address, rows = result.rows_affected(), "Ledger debit");
        Ok(result.rows_affected())
    }
}
