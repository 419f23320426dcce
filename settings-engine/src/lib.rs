//! Dynamic settings engine for MailGate
//!
//! Settings live as JSON values in the `gateway_settings` table and are
//! read through a short-TTL cache, so operators can update them at
//! runtime (the recipient block list in particular) without a redeploy
//! and without a database round trip on every send.

pub mod cache;
pub mod error;

pub use error::{SettingsError, SettingsResult};

use cache::SettingsCache;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, warn};

/// Default freshness window for cached settings, in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Read-through accessor over the dynamic settings table
#[derive(Clone)]
pub struct SettingsEngine {
    pool: PgPool,
    cache: SettingsCache,
}

impl SettingsEngine {
    pub fn new(pool: PgPool, ttl_seconds: u64) -> Self {
        Self {
            pool,
            cache: SettingsCache::new(ttl_seconds, 100),
        }
    }

    /// Fetch a setting as parsed JSON, or `None` when the key is absent.
    ///
    /// Reads hit the cache first; a miss falls through to the table and
    /// populates the cache for the TTL window.
    pub async fn get_json(&self, key: &str) -> SettingsResult<Option<Value>> {
        if let Some(value) = self.cache.get(key).await {
            return Ok(Some(value));
        }

        let row: Option<(Value,)> =
            sqlx::query_as("SELECT value FROM gateway_settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((value,)) => {
                self.cache.set(key.to_string(), value.clone()).await;
                Ok(Some(value))
            }
            None => {
                debug!(key = %key, "Setting not found");
                Ok(None)
            }
        }
    }

    /// Fetch a setting expected to be a JSON array of strings.
    ///
    /// Anything other than an array of strings, a missing key, or a read
    /// failure all collapse to an empty list: settings reads must never
    /// take the caller down with them.
    pub async fn string_list(&self, key: &str) -> Vec<String> {
        match self.get_json(key).await {
            Ok(value) => as_string_list(value.as_ref()),
            Err(e) => {
                warn!(key = %key, error = %e, "Settings read failed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Drop a cached entry so the next read goes to the table
    pub async fn invalidate(&self, key: &str) {
        self.cache.invalidate(key).await;
    }
}

/// Extract the string members of a JSON array, skipping everything else
pub fn as_string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_list_from_array() {
        let value = json!(["spam.example", "@blocked.org"]);
        assert_eq!(
            as_string_list(Some(&value)),
            vec!["spam.example".to_string(), "@blocked.org".to_string()]
        );
    }

    #[test]
    fn test_string_list_skips_non_strings() {
        let value = json!(["a", 42, null, {"x": 1}, "b"]);
        assert_eq!(
            as_string_list(Some(&value)),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_string_list_missing_value() {
        assert!(as_string_list(None).is_empty());
    }

    #[test]
    fn test_string_list_wrong_shape() {
        let value = json!({"not": "a list"});
        assert!(as_string_list(Some(&value)).is_empty());
    }
}
