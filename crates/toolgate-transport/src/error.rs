//! Transport failure classification.

use thiserror::Error;

/// Any way a transport-level invocation can fail.
///
/// Adapters construct these with descriptive messages; the executor collapses
/// them all into the `EXECUTION_ERROR` response code and keeps only
/// [`TransportError::is_timeout`] for log-status classification.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to spawn '{command}': {message}")]
    Spawn { command: String, message: String },

    #[error("transport I/O error: {message}")]
    Io { message: String },

    #[error("tool call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("process exited with {}: {detail}", exit_label(.code))]
    ProcessExit { code: Option<i32>, detail: String },

    #[error("tool returned an error: {message}")]
    Rpc { message: String },

    #[error("failed to parse response: {raw}")]
    MalformedResponse { raw: String },

    #[error("http request failed: {message}")]
    Http { message: String },

    #[error("{transport} transport is not yet implemented")]
    Unsupported { transport: &'static str },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "signal".to_string(),
    }
}

impl TransportError {
    pub fn io(message: impl Into<String>) -> Self {
        TransportError::Io {
            message: message.into(),
        }
    }

    pub fn http(message: impl Into<String>) -> Self {
        TransportError::Http {
            message: message.into(),
        }
    }

    /// Whether this failure was the wall-clock timeout firing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout { .. })
    }
}
