//! Owner-scoped paging over the send audit log

use std::sync::Arc;

use database_layer::SendRecord;

use crate::error::ApiError;
use crate::services::AuditStore;
use crate::{validate_field, validate_required};

/// One page of audit records plus the total count.
///
/// `count` is real only on the first page; later pages carry a sentinel
/// zero and callers reuse the count from the first response.
#[derive(Debug)]
pub struct SendboxPage {
    pub results: Vec<SendRecord>,
    pub count: i64,
}

pub async fn fetch_page(
    audit: &Arc<dyn AuditStore>,
    address: &str,
    limit: i64,
    offset: i64,
) -> Result<SendboxPage, ApiError> {
    validate_required!(address, "No address");
    validate_field!(limit, (1..=100).contains(&limit), "Invalid limit");
    validate_field!(offset, offset >= 0, "Invalid offset");

    let results = audit.list(address, limit, offset).await?;
    let count = if offset == 0 {
        audit.count(address).await?
    } else {
        0
    };

    Ok(SendboxPage { results, count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use database_layer::DatabaseResult;
    use serde_json::{json, Value};

    struct MockAudit {
        total: i64,
    }

    #[async_trait]
    impl AuditStore for MockAudit {
        async fn record(&self, _: &str, _: &Value) -> DatabaseResult<()> {
            Ok(())
        }

        async fn list(
            &self,
            address: &str,
            limit: i64,
            offset: i64,
        ) -> DatabaseResult<Vec<SendRecord>> {
            let first = self.total - offset;
            let ids = (0..limit)
                .map(|i| first - i)
                .filter(|id| *id > 0)
                .collect::<Vec<_>>();
            Ok(ids
                .into_iter()
                .map(|id| SendRecord {
                    id,
                    address: address.to_string(),
                    mail: json!({"subject": "hi"}),
                    created_at: Utc::now(),
                })
                .collect())
        }

        async fn count(&self, _: &str) -> DatabaseResult<i64> {
            Ok(self.total)
        }
    }

    fn audit(total: i64) -> Arc<dyn AuditStore> {
        Arc::new(MockAudit { total })
    }

    #[tokio::test]
    async fn test_first_page_has_true_count() {
        let page = fetch_page(&audit(7), "a@x.com", 5, 0).await.unwrap();
        assert_eq!(page.count, 7);
        assert_eq!(page.results.len(), 5);
        // Newest first
        assert_eq!(page.results[0].id, 7);
    }

    #[tokio::test]
    async fn test_later_pages_carry_sentinel_count() {
        let page = fetch_page(&audit(7), "a@x.com", 5, 5).await.unwrap();
        assert_eq!(page.count, 0);
        assert_eq!(page.results.len(), 2);
    }

    #[tokio::test]
    async fn test_limit_bounds() {
        for limit in [0, 101, -3] {
            let err = fetch_page(&audit(7), "a@x.com", limit, 0).await.unwrap_err();
            assert_eq!(err.to_string(), "Invalid limit");
        }
        assert!(fetch_page(&audit(7), "a@x.com", 100, 0).await.is_ok());
        assert!(fetch_page(&audit(7), "a@x.com", 1, 0).await.is_ok());
    }

    #[tokio::test]
    async fn test_negative_offset() {
        let err = fetch_page(&audit(7), "a@x.com", 5, -1).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid offset");
    }

    #[tokio::test]
    async fn test_missing_address() {
        let err = fetch_page(&audit(7), " ", 5, 0).await.unwrap_err();
        assert_eq!(err.to_string(), "No address");
    }
}
