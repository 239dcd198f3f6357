//! Builtin tool handlers.
//!
//! Builtin providers are registered like any other provider but execute
//! in-process instead of crossing a transport. The surrounding application
//! supplies one handler per scope; the executor picks the handler by the
//! provider's scope (or the request's, for a both-scoped provider).

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use toolgate_core::{CallContext, Scope};

/// In-process implementation of a builtin provider's tools.
///
/// The error is a plain message; the executor wraps it into the execution
/// failure code like any transport error.
#[async_trait]
pub trait BuiltinHandler: Send + Sync {
    async fn invoke(
        &self,
        tool: &str,
        params: &Map<String, Value>,
        context: Option<&CallContext>,
    ) -> Result<Value, String>;
}

/// One optional handler per scope.
#[derive(Clone, Default)]
pub struct BuiltinHandlers {
    workspace: Option<Arc<dyn BuiltinHandler>>,
    chat: Option<Arc<dyn BuiltinHandler>>,
}

impl BuiltinHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspace(mut self, handler: Arc<dyn BuiltinHandler>) -> Self {
        self.workspace = Some(handler);
        self
    }

    pub fn with_chat(mut self, handler: Arc<dyn BuiltinHandler>) -> Self {
        self.chat = Some(handler);
        self
    }

    pub fn for_scope(&self, scope: Scope) -> Option<&Arc<dyn BuiltinHandler>> {
        match scope {
            Scope::Workspace => self.workspace.as_ref(),
            Scope::Chat => self.chat.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl BuiltinHandler for Echo {
        async fn invoke(
            &self,
            tool: &str,
            _params: &Map<String, Value>,
            _context: Option<&CallContext>,
        ) -> Result<Value, String> {
            Ok(json!(tool))
        }
    }

    #[tokio::test]
    async fn handlers_are_selected_by_scope() {
        let handlers = BuiltinHandlers::new().with_workspace(Arc::new(Echo));

        assert!(handlers.for_scope(Scope::Workspace).is_some());
        assert!(handlers.for_scope(Scope::Chat).is_none());

        let handler = handlers.for_scope(Scope::Workspace).unwrap();
        let result = handler.invoke("list_files", &Map::new(), None).await.unwrap();
        assert_eq!(result, json!("list_files"));
    }
}
