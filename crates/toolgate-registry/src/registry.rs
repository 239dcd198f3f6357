//! Provider registry.
//!
//! Read-mostly map of provider id to entry. Registration happens at startup
//! (static configuration) or through an administrative registration call; the
//! call path only resolves entries and bumps usage counters.

use crate::policy::{AllowAllPolicy, PermissionPolicy};
use crate::provider::{ProviderEntry, ProviderSpec};
use crate::usage::{InMemoryUsageStore, UsageStore};
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use toolgate_core::Scope;
use tracing::{debug, warn};

/// Errors from registry administration. Never produced on the call path.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("provider '{provider_id}' is already registered")]
    DuplicateProvider { provider_id: String },
}

/// Registry of tool providers with injected permission and usage seams.
pub struct ProviderRegistry {
    providers: DashMap<String, Arc<ProviderEntry>>,
    policy: Arc<dyn PermissionPolicy>,
    usage: Arc<dyn UsageStore>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    /// Registry with the allow-all policy and an in-memory usage store.
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
            policy: Arc::new(AllowAllPolicy),
            usage: Arc::new(InMemoryUsageStore::new()),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn PermissionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_usage_store(mut self, usage: Arc<dyn UsageStore>) -> Self {
        self.usage = usage;
        self
    }

    /// Seed a registry from static configuration.
    pub fn from_specs(specs: impl IntoIterator<Item = ProviderSpec>) -> Result<Self, RegistryError> {
        let registry = Self::new();
        for spec in specs {
            registry.register(spec.into())?;
        }
        Ok(registry)
    }

    /// Register a provider. Duplicate ids are rejected rather than replaced.
    pub fn register(&self, entry: ProviderEntry) -> Result<(), RegistryError> {
        if self.providers.contains_key(&entry.id) {
            return Err(RegistryError::DuplicateProvider {
                provider_id: entry.id,
            });
        }
        debug!(provider = %entry.id, scope = %entry.scope, builtin = entry.is_builtin, "provider registered");
        self.providers.insert(entry.id.clone(), Arc::new(entry));
        Ok(())
    }

    /// Look up a provider by id.
    pub fn resolve(&self, provider_id: &str) -> Option<Arc<ProviderEntry>> {
        self.providers.get(provider_id).map(|entry| Arc::clone(&entry))
    }

    /// Providers visible to `user_id` in `scope`: scope must match or be
    /// `both`, and the permission policy must allow the pair.
    pub async fn list_available(&self, user_id: i64, scope: Scope) -> Vec<Arc<ProviderEntry>> {
        // Snapshot the scope matches before consulting the policy: a dashmap
        // shard guard must never be held across an await, or a concurrent
        // register targeting that shard blocks its whole thread.
        let candidates: Vec<Arc<ProviderEntry>> = self
            .providers
            .iter()
            .filter(|entry| entry.scope.allows(scope))
            .map(|entry| Arc::clone(&entry))
            .collect();

        let mut available = Vec::new();
        for entry in candidates {
            if self.policy.is_allowed(user_id, &entry.id).await {
                available.push(entry);
            }
        }
        available.sort_by(|a, b| a.id.cmp(&b.id));
        available
    }

    /// Bump the advisory usage counter for one user/provider pair.
    ///
    /// Best-effort: a failing store is logged and swallowed so it can never
    /// fail or block the invocation that triggered it.
    pub async fn record_usage(&self, user_id: i64, provider_id: &str) {
        if let Err(err) = self.usage.increment(user_id, provider_id).await {
            warn!(provider = provider_id, user = user_id, error = %err, "usage recording failed");
        }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
