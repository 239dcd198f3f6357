//! Provider registry records.

use serde::{Deserialize, Serialize};
use toolgate_core::{ConnectionDescriptor, ProviderScope, ToolDefinition};

/// One registered tool provider.
///
/// Created at registration time, read on every invocation, never deleted in
/// normal operation (removal is an administrative operation outside this
/// crate).
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderEntry {
    pub id: String,
    pub scope: ProviderScope,
    pub is_builtin: bool,
    pub tools: Vec<ToolDefinition>,
    pub connection: ConnectionDescriptor,
}

impl ProviderEntry {
    pub fn new(
        id: impl Into<String>,
        scope: ProviderScope,
        connection: ConnectionDescriptor,
    ) -> Self {
        Self {
            id: id.into(),
            scope,
            is_builtin: false,
            tools: Vec::new(),
            connection,
        }
    }

    pub fn builtin(mut self) -> Self {
        self.is_builtin = true;
        self
    }

    pub fn with_tool(mut self, tool: ToolDefinition) -> Self {
        self.tools.push(tool);
        self
    }

    /// Look up a tool by name within this provider.
    pub fn find_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|tool| tool.name == name)
    }
}

/// Serde mirror of [`ProviderEntry`] for seeding a registry from static
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSpec {
    pub id: String,
    pub scope: ProviderScope,
    #[serde(default)]
    pub is_builtin: bool,
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,
    pub connection: ConnectionDescriptor,
}

impl From<ProviderSpec> for ProviderEntry {
    fn from(spec: ProviderSpec) -> Self {
        ProviderEntry {
            id: spec.id,
            scope: spec.scope,
            is_builtin: spec.is_builtin,
            tools: spec.tools,
            connection: spec.connection,
        }
    }
}
