//! Database access layer for MailGate
//!
//! This crate owns the two durable stores of the gateway:
//! - the sender ledger (`sender_accounts`): one row per enrolled address,
//!   holding the remaining send balance and the enabled flag
//! - the audit log (`send_records`): an append-only record of every send
//!   attempt that reached dispatch, pageable newest-first per address
//!
//! All access goes through repositories over a shared `PgPool` using
//! parameterized statements. Schema lives in embedded migrations.

pub mod audit;
pub mod connection;
pub mod error;
pub mod ledger;
pub mod models;

pub use audit::AuditRepository;
pub use connection::DatabasePool;
pub use error::{DatabaseError, DatabaseResult};
pub use ledger::LedgerRepository;
pub use models::{SendRecord, SenderAccount};

/// Embedded migrations for the ledger, audit and settings tables
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
