//! Settings caching implementation

use moka::future::Cache;
use serde_json::Value;
use std::time::Duration;

#[derive(Clone)]
pub struct SettingsCache {
    cache: Cache<String, Value>,
    ttl: Duration,
}

impl SettingsCache {
    pub fn new(ttl_seconds: u64, max_entries: usize) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries as u64)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build();

        Self {
            cache,
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.cache.get(key).await
    }

    pub async fn set(&self, key: String, value: Value) {
        self.cache.insert(key, value).await;
    }

    pub async fn invalidate(&self, key: &str) {
        self.cache.invalidate(key).await;
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_cache_round_trip() {
        let cache = SettingsCache::new(60, 10);
        cache.set("block_list".to_string(), json!(["x"])).await;
        assert_eq!(cache.get("block_list").await, Some(json!(["x"])));
    }

    #[tokio::test]
    async fn test_cache_invalidate() {
        let cache = SettingsCache::new(60, 10);
        cache.set("block_list".to_string(), json!(["x"])).await;
        cache.invalidate("block_list").await;
        assert_eq!(cache.get("block_list").await, None);
    }
}
