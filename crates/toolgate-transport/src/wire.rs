//! JSON-RPC wire envelope.
//!
//! The same shape is written to a child process's stdin and POSTed to an
//! HTTP endpoint, one request per invocation: the tool name is the method,
//! the call parameters are the params object.

use crate::error::TransportError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One outgoing request: `{"jsonrpc":"2.0","method":..,"params":..,"id":..}`.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Value,
    pub id: u64,
}

impl RpcRequest {
    pub fn new(tool: &str, params: &Map<String, Value>, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: tool.to_string(),
            params: Value::Object(params.clone()),
            id,
        }
    }

    /// Serialize as a single line, the framing both transports use.
    pub fn to_line(&self) -> Result<String, TransportError> {
        serde_json::to_string(self)
            .map_err(|err| TransportError::io(format!("failed to serialize request: {err}")))
    }
}

/// The error member of a JSON-RPC response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

/// One incoming response: either a `result` or an `error`.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorBody>,
}

impl RpcResponse {
    /// Parse raw transport output, rejecting unparseable text with the raw
    /// payload attached for diagnosis.
    pub fn parse(raw: &str) -> Result<Self, TransportError> {
        serde_json::from_str(raw.trim()).map_err(|_| TransportError::MalformedResponse {
            raw: raw.trim().to_string(),
        })
    }

    /// An `error` member rejects with its message; otherwise the `result`
    /// payload is returned verbatim (null when absent).
    pub fn into_result(self) -> Result<Value, TransportError> {
        if let Some(error) = self.error {
            return Err(TransportError::Rpc {
                message: error.message,
            });
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}
