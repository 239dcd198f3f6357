//! Transport connection descriptors.
//!
//! A descriptor is a tagged union over the supported connection kinds, so an
//! adapter for one transport can never be handed another transport's
//! configuration. The executor dispatches on the variant exactly once per
//! call.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default wall-clock budget for a single remote invocation.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// How to reach a provider, tagged by transport kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConnectionDescriptor {
    Stdio(StdioConnection),
    Http(HttpConnection),
    WebSocket(WebSocketConnection),
}

impl ConnectionDescriptor {
    /// Transport kind name, for logging and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectionDescriptor::Stdio(_) => "stdio",
            ConnectionDescriptor::Http(_) => "http",
            ConnectionDescriptor::WebSocket(_) => "websocket",
        }
    }
}

/// Subprocess pipe connection: spawn a child process and speak JSON-RPC over
/// its standard streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdioConnection {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Environment overrides merged over the inherited environment.
    #[serde(default)]
    pub env: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl StdioConnection {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            env: HashMap::new(),
            timeout_ms: None,
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)
    }
}

/// HTTP endpoint connection: POST JSON-RPC envelopes to a fixed URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConnection {
    pub url: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl HttpConnection {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            timeout_ms: None,
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)
    }
}

/// Socket-stream connection. Reserved: invoking it fails deterministically
/// with an unsupported-transport error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSocketConnection {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptor_deserializes_by_tag() {
        let conn: ConnectionDescriptor = serde_json::from_value(json!({
            "type": "stdio",
            "command": "node",
            "args": ["server.js"],
            "env": {"API_KEY": "k"},
            "timeout_ms": 5000
        }))
        .unwrap();

        match conn {
            ConnectionDescriptor::Stdio(stdio) => {
                assert_eq!(stdio.command, "node");
                assert_eq!(stdio.args, vec!["server.js"]);
                assert_eq!(stdio.env.get("API_KEY").map(String::as_str), Some("k"));
                assert_eq!(stdio.timeout_ms(), 5000);
            }
            other => panic!("expected stdio descriptor, got {}", other.kind()),
        }
    }

    #[test]
    fn http_descriptor_defaults_timeout() {
        let conn: ConnectionDescriptor = serde_json::from_value(json!({
            "type": "http",
            "url": "https://tools.example.com/rpc"
        }))
        .unwrap();

        match conn {
            ConnectionDescriptor::Http(http) => {
                assert_eq!(http.timeout_ms(), DEFAULT_TIMEOUT_MS);
                assert!(http.headers.is_empty());
            }
            other => panic!("expected http descriptor, got {}", other.kind()),
        }
    }

    #[test]
    fn kind_names_cover_all_variants() {
        let stdio = ConnectionDescriptor::Stdio(StdioConnection::new("cat"));
        let http = ConnectionDescriptor::Http(HttpConnection::new("http://localhost"));
        let ws = ConnectionDescriptor::WebSocket(WebSocketConnection {
            url: "ws://localhost".into(),
        });

        assert_eq!(stdio.kind(), "stdio");
        assert_eq!(http.kind(), "http");
        assert_eq!(ws.kind(), "websocket");
    }
}
