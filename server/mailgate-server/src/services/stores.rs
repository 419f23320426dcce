//! Store and dispatch seams for the send pipeline
//!
//! The pipeline depends on these traits rather than on the concrete
//! repositories, so its behavior under store and provider failure is
//! testable without a database or a live provider.

use async_trait::async_trait;
use database_layer::{AuditRepository, DatabaseResult, LedgerRepository, SendRecord, SenderAccount};
use delivery_service::{DeliveryResult, DeliveryService, MailEnvelope};
use serde_json::Value;
use settings_engine::SettingsEngine;

/// The sender quota ledger
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn create_account(&self, address: &str, balance: i64, enabled: bool)
        -> DatabaseResult<()>;
    async fn account(&self, address: &str) -> DatabaseResult<Option<SenderAccount>>;
    /// Conditional decrement; returns rows affected (0 on a lost race)
    async fn debit(&self, address: &str) -> DatabaseResult<u64>;
}

/// The append-only send audit log
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn record(&self, address: &str, mail: &Value) -> DatabaseResult<()>;
    async fn list(&self, address: &str, limit: i64, offset: i64) -> DatabaseResult<Vec<SendRecord>>;
    async fn count(&self, address: &str) -> DatabaseResult<i64>;
}

/// The dynamic recipient block list. Infallible: a source that cannot be
/// read reports no restrictions.
#[async_trait]
pub trait BlocklistSource: Send + Sync {
    async fn blocked_substrings(&self) -> Vec<String>;
}

/// The external delivery provider
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    async fn dispatch(&self, envelope: &MailEnvelope) -> DeliveryResult<()>;
}

#[async_trait]
impl LedgerStore for LedgerRepository {
    async fn create_account(
        &self,
        address: &str,
        balance: i64,
        enabled: bool,
    ) -> DatabaseResult<()> {
        LedgerRepository::create_account(self, address, balance, enabled).await?;
        Ok(())
    }

    async fn account(&self, address: &str) -> DatabaseResult<Option<SenderAccount>> {
        self.get_account(address).await
    }

    async fn debit(&self, address: &str) -> DatabaseResult<u64> {
        LedgerRepository::debit(self, address).await
    }
}

#[async_trait]
impl AuditStore for AuditRepository {
    async fn record(&self, address: &str, mail: &Value) -> DatabaseResult<()> {
        self.insert_record(address, mail).await?;
        Ok(())
    }

    async fn list(&self, address: &str, limit: i64, offset: i64) -> DatabaseResult<Vec<SendRecord>> {
        self.list_records(address, limit, offset).await
    }

    async fn count(&self, address: &str) -> DatabaseResult<i64> {
        self.count_records(address).await
    }
}

/// Block list backed by the dynamic settings engine
#[derive(Clone)]
pub struct BlocklistSettings {
    settings: SettingsEngine,
    key: String,
}

impl BlocklistSettings {
    pub fn new(settings: SettingsEngine, key: String) -> Self {
        Self { settings, key }
    }
}

#[async_trait]
impl BlocklistSource for BlocklistSettings {
    async fn blocked_substrings(&self) -> Vec<String> {
        self.settings.string_list(&self.key).await
    }
}

#[async_trait]
impl MailDispatcher for DeliveryService {
    async fn dispatch(&self, envelope: &MailEnvelope) -> DeliveryResult<()> {
        self.send(envelope).await
    }
}
