//! Usage counters.
//!
//! Advisory per-user-per-provider invocation counts. Increments are atomic
//! per key but unordered; the counts feed observability, not billing.

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

/// A usage-store write failed. Callers treat this as diagnostic-only.
#[derive(Debug, Error)]
#[error("usage counter increment failed: {message}")]
pub struct UsageStoreError {
    pub message: String,
}

impl UsageStoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Persistent counter store. Injected at startup with an explicit lifecycle;
/// flushing/persistence is the implementation's concern.
#[async_trait]
pub trait UsageStore: Send + Sync {
    async fn increment(&self, user_id: i64, provider_id: &str) -> Result<(), UsageStoreError>;
}

/// In-process counter store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryUsageStore {
    counts: DashMap<(i64, String), u64>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for one user/provider pair.
    pub fn count(&self, user_id: i64, provider_id: &str) -> u64 {
        self.counts
            .get(&(user_id, provider_id.to_string()))
            .map(|entry| *entry)
            .unwrap_or(0)
    }

    /// Snapshot of all counters, for export or inspection.
    pub fn snapshot(&self) -> Vec<((i64, String), u64)> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

#[async_trait]
impl UsageStore for InMemoryUsageStore {
    async fn increment(&self, user_id: i64, provider_id: &str) -> Result<(), UsageStoreError> {
        *self
            .counts
            .entry((user_id, provider_id.to_string()))
            .or_insert(0) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn increments_accumulate_per_key() {
        let store = InMemoryUsageStore::new();
        store.increment(1, "github").await.unwrap();
        store.increment(1, "github").await.unwrap();
        store.increment(2, "github").await.unwrap();
        store.increment(1, "weather").await.unwrap();

        assert_eq!(store.count(1, "github"), 2);
        assert_eq!(store.count(2, "github"), 1);
        assert_eq!(store.count(1, "weather"), 1);
        assert_eq!(store.count(3, "github"), 0);
    }

    #[tokio::test]
    async fn concurrent_increments_land() {
        let store = Arc::new(InMemoryUsageStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.increment(1, "github").await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.count(1, "github"), 16);
    }
}
