//! Permission policy seam.
//!
//! The policy itself lives in the surrounding application (plans, admin
//! grants, moderation state). The registry only consults it when listing
//! providers for a caller.

use async_trait::async_trait;

/// Decides whether a user may use a provider.
#[async_trait]
pub trait PermissionPolicy: Send + Sync {
    async fn is_allowed(&self, user_id: i64, provider_id: &str) -> bool;
}

/// Policy that permits everything. The default when no application policy is
/// injected, and the usual choice in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAllPolicy;

#[async_trait]
impl PermissionPolicy for AllowAllPolicy {
    async fn is_allowed(&self, _user_id: i64, _provider_id: &str) -> bool {
        true
    }
}
