//! Call-log sink.
//!
//! Append-only record of every invocation attempt, successful or not. The
//! executor writes exactly one record per call; the store behind the sink is
//! the surrounding application's concern.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use toolgate_core::Scope;

/// Outcome classification recorded alongside each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Success,
    Failed,
    Timeout,
    PermissionDenied,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Success => "success",
            CallStatus::Failed => "failed",
            CallStatus::Timeout => "timeout",
            CallStatus::PermissionDenied => "permission_denied",
        }
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable invocation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLogRecord {
    pub user_id: Option<i64>,
    pub provider_id: String,
    pub tool: String,
    pub scope: Scope,
    /// Request parameters, serialized as a JSON string.
    pub params: String,
    /// Result payload on success, serialized as a JSON string.
    pub result: Option<String>,
    pub status: CallStatus,
    pub latency_ms: u64,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A call-log write failed. The executor never lets this alter a response.
#[derive(Debug, Error)]
#[error("call log append failed: {message}")]
pub struct CallLogError {
    pub message: String,
}

impl CallLogError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Write-only sink for invocation records.
#[async_trait]
pub trait CallLogSink: Send + Sync {
    async fn append(&self, record: CallLogRecord) -> Result<(), CallLogError>;
}

/// In-process sink retaining records in order. Default sink when no
/// persistent store is injected; also the assertion point in tests.
#[derive(Debug, Default)]
pub struct InMemoryCallLog {
    records: Mutex<Vec<CallLogRecord>>,
}

impl InMemoryCallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<CallLogRecord> {
        self.records.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl CallLogSink for InMemoryCallLog {
    async fn append(&self, record: CallLogRecord) -> Result<(), CallLogError> {
        self.records.lock().await.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: CallStatus) -> CallLogRecord {
        CallLogRecord {
            user_id: Some(1),
            provider_id: "github".into(),
            tool: "create_issue".into(),
            scope: Scope::Workspace,
            params: "{}".into(),
            result: None,
            status,
            latency_ms: 3,
            error_message: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn appends_preserve_order() {
        let log = InMemoryCallLog::new();
        log.append(record(CallStatus::Success)).await.unwrap();
        log.append(record(CallStatus::Failed)).await.unwrap();

        let records = log.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, CallStatus::Success);
        assert_eq!(records[1].status, CallStatus::Failed);
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&CallStatus::PermissionDenied).unwrap(),
            "\"permission_denied\""
        );
        assert_eq!(CallStatus::Timeout.as_str(), "timeout");
    }
}
