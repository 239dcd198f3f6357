//! WebSocket transport stub.
//!
//! The descriptor format reserves the `websocket` connection kind, but no
//! provider uses it yet. Invoking one fails deterministically instead of
//! panicking, so a misconfigured provider produces a normal error response.

use crate::error::TransportError;
use serde_json::{Map, Value};
use toolgate_core::WebSocketConnection;
use tracing::warn;

#[derive(Debug, Default)]
pub struct WebSocketTransport;

impl WebSocketTransport {
    pub fn new() -> Self {
        Self
    }

    pub async fn invoke(
        &self,
        conn: &WebSocketConnection,
        tool: &str,
        _params: &Map<String, Value>,
    ) -> Result<Value, TransportError> {
        warn!(url = %conn.url, tool, "websocket transport invoked but not implemented");
        Err(TransportError::Unsupported {
            transport: "websocket",
        })
    }
}
