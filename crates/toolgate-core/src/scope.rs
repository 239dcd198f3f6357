//! Invocation scopes.
//!
//! Every call is made in exactly one operational context (a workspace or a
//! chat), while a provider declares which contexts it serves. Keeping the two
//! as separate enums means a request can never claim the `both` pseudo-scope.

use serde::{Deserialize, Serialize};

/// The operational context a single call runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Workspace,
    Chat,
}

impl Scope {
    /// Get the scope name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Workspace => "workspace",
            Scope::Chat => "chat",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The contexts a provider is registered for.
///
/// `Both` providers accept calls from either scope; single-scope providers
/// reject the other scope with a scope-mismatch error before any transport
/// is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderScope {
    Workspace,
    Chat,
    Both,
}

impl ProviderScope {
    /// Whether a call made in `scope` may reach this provider.
    pub fn allows(&self, scope: Scope) -> bool {
        match self {
            ProviderScope::Both => true,
            ProviderScope::Workspace => scope == Scope::Workspace,
            ProviderScope::Chat => scope == Scope::Chat,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderScope::Workspace => "workspace",
            ProviderScope::Chat => "chat",
            ProviderScope::Both => "both",
        }
    }
}

impl std::fmt::Display for ProviderScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
