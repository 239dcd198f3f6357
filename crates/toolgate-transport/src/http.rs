//! HTTP transport.
//!
//! POSTs the JSON-RPC envelope to the provider's URL with any configured
//! headers attached. The per-request timeout comes from the connection
//! descriptor; reqwest's own errors are wrapped at this boundary so nothing
//! reqwest-specific leaks upward.

use crate::error::TransportError;
use crate::wire::{RpcRequest, RpcResponse};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use toolgate_core::HttpConnection;
use tracing::debug;

/// POSTs JSON-RPC envelopes to fixed provider endpoints.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Invoke `tool` with `params` against the endpoint described by `conn`.
    pub async fn invoke(
        &self,
        conn: &HttpConnection,
        tool: &str,
        params: &Map<String, Value>,
    ) -> Result<Value, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let timeout_ms = conn.timeout_ms();

        debug!(url = %conn.url, tool, timeout_ms, "posting to http provider");

        // Build the descriptor headers as a map so they replace defaults
        // (notably the Content-Type set by `.json`) instead of appending a
        // second value.
        let mut headers = HeaderMap::new();
        for (key, value) in &conn.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|err| TransportError::http(format!("invalid header name '{key}': {err}")))?;
            let value = HeaderValue::from_str(value).map_err(|err| {
                TransportError::http(format!("invalid value for header '{key}': {err}"))
            })?;
            headers.insert(name, value);
        }

        let request = self
            .client
            .post(&conn.url)
            .timeout(Duration::from_millis(timeout_ms))
            .json(&RpcRequest::new(tool, params, id))
            .headers(headers);

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                TransportError::Timeout { timeout_ms }
            } else {
                TransportError::http(err.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::http(format!("failed to read response body: {err}")))?;

        if !status.is_success() {
            return Err(TransportError::http(format!(
                "endpoint returned {status}: {}",
                body.trim()
            )));
        }

        RpcResponse::parse(&body)?.into_result()
    }
}
