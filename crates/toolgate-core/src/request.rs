//! Inbound call envelope.

use crate::scope::Scope;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Who is calling. Supplied by the surrounding application; the executor only
/// threads it through to logging, usage accounting, and builtin handlers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

impl CallContext {
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            workspace_id: None,
        }
    }

    pub fn in_workspace(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }
}

/// One tool-call request. Constructed per call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRequest {
    pub provider_id: String,
    pub tool: String,
    pub scope: Scope,
    #[serde(default)]
    pub params: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<CallContext>,
}

impl CallRequest {
    pub fn new(provider_id: impl Into<String>, tool: impl Into<String>, scope: Scope) -> Self {
        Self {
            provider_id: provider_id.into(),
            tool: tool.into(),
            scope,
            params: Map::new(),
            context: None,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    pub fn with_context(mut self, context: CallContext) -> Self {
        self.context = Some(context);
        self
    }

    /// The calling user, if the surrounding application attached one.
    pub fn user_id(&self) -> Option<i64> {
        self.context.as_ref().and_then(|c| c.user_id)
    }
}
