use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Unique constraint violation")]
    UniqueViolation,

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

impl DatabaseError {
    /// Collapse a sqlx error into the distinct unique-violation signal.
    ///
    /// Duplicate enrollment is detected solely through this signal; the
    /// store is the source of truth, there is no separate existence check.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DatabaseError::UniqueViolation
            }
            _ => DatabaseError::SqlxError(err),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DatabaseError::UniqueViolation)
    }
}
