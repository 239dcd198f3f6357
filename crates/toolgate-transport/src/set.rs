//! Transport dispatch.

use crate::error::TransportError;
use crate::http::HttpTransport;
use crate::stdio::StdioTransport;
use crate::websocket::WebSocketTransport;
use serde_json::{Map, Value};
use toolgate_core::ConnectionDescriptor;

/// One adapter per connection kind, dispatched on the descriptor variant.
///
/// Holding all three in one struct keeps the executor free of transport
/// construction; the HTTP client in particular is built once and reused
/// across calls.
#[derive(Debug, Default)]
pub struct TransportSet {
    stdio: StdioTransport,
    http: HttpTransport,
    websocket: WebSocketTransport,
}

impl TransportSet {
    pub fn new() -> Self {
        Self {
            stdio: StdioTransport::new(),
            http: HttpTransport::new(),
            websocket: WebSocketTransport::new(),
        }
    }

    /// Route the call to the adapter matching the connection descriptor.
    pub async fn invoke(
        &self,
        conn: &ConnectionDescriptor,
        tool: &str,
        params: &Map<String, Value>,
    ) -> Result<Value, TransportError> {
        match conn {
            ConnectionDescriptor::Stdio(stdio) => self.stdio.invoke(stdio, tool, params).await,
            ConnectionDescriptor::Http(http) => self.http.invoke(http, tool, params).await,
            ConnectionDescriptor::WebSocket(ws) => self.websocket.invoke(ws, tool, params).await,
        }
    }
}
