//! Outbound response envelope.
//!
//! Success and failure carry metadata of identical shape, so callers read
//! duration and timestamp the same way on both paths and never branch on the
//! envelope shape itself.

use crate::error::{ErrorCode, ExecuteError};
use crate::scope::Scope;
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Per-call bookkeeping attached to every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallMetadata {
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "mcpId")]
    pub provider_id: String,
    pub tool: String,
    pub scope: Scope,
}

/// The failure half of the envelope: a stable code plus a human-readable
/// message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallError {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&ExecuteError> for CallError {
    fn from(err: &ExecuteError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// The envelope returned for every invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum CallResponse {
    Success { result: Value, metadata: CallMetadata },
    Failure { error: CallError, metadata: CallMetadata },
}

impl CallResponse {
    pub fn success(result: Value, metadata: CallMetadata) -> Self {
        CallResponse::Success { result, metadata }
    }

    pub fn failure(error: CallError, metadata: CallMetadata) -> Self {
        CallResponse::Failure { error, metadata }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallResponse::Success { .. })
    }

    pub fn metadata(&self) -> &CallMetadata {
        match self {
            CallResponse::Success { metadata, .. } => metadata,
            CallResponse::Failure { metadata, .. } => metadata,
        }
    }

    /// The result payload, if this call succeeded.
    pub fn result(&self) -> Option<&Value> {
        match self {
            CallResponse::Success { result, .. } => Some(result),
            CallResponse::Failure { .. } => None,
        }
    }

    /// The failure, if this call did not succeed.
    pub fn error(&self) -> Option<&CallError> {
        match self {
            CallResponse::Success { .. } => None,
            CallResponse::Failure { error, .. } => Some(error),
        }
    }
}

// The wire shape carries an explicit `success` flag rather than a serde tag:
// {"success":true,"result":..,"metadata":..} / {"success":false,"error":..}.
impl Serialize for CallResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CallResponse::Success { result, metadata } => {
                let mut s = serializer.serialize_struct("CallResponse", 3)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("result", result)?;
                s.serialize_field("metadata", metadata)?;
                s.end()
            }
            CallResponse::Failure { error, metadata } => {
                let mut s = serializer.serialize_struct("CallResponse", 3)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("error", error)?;
                s.serialize_field("metadata", metadata)?;
                s.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata() -> CallMetadata {
        CallMetadata {
            duration_ms: 12,
            timestamp: Utc::now(),
            provider_id: "github".into(),
            tool: "create_issue".into(),
            scope: Scope::Workspace,
        }
    }

    #[test]
    fn success_envelope_shape() {
        let response = CallResponse::success(json!({"ok": true}), metadata());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["result"], json!({"ok": true}));
        assert_eq!(value["metadata"]["mcpId"], json!("github"));
        assert_eq!(value["metadata"]["duration"], json!(12));
        assert_eq!(value["metadata"]["scope"], json!("workspace"));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failure_envelope_shape() {
        let error = CallError {
            code: ErrorCode::ToolNotFound,
            message: "tool 'x' not found on provider 'github'".into(),
        };
        let response = CallResponse::failure(error, metadata());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"]["code"], json!("TOOL_NOT_FOUND"));
        assert!(value.get("result").is_none());
        // Metadata shape is identical on the failure path.
        assert_eq!(value["metadata"]["tool"], json!("create_issue"));
        assert_eq!(value["metadata"]["duration"], json!(12));
    }

    #[test]
    fn accessors_match_variant() {
        let ok = CallResponse::success(json!(1), metadata());
        assert!(ok.is_success());
        assert_eq!(ok.result(), Some(&json!(1)));
        assert!(ok.error().is_none());

        let err = CallResponse::failure(
            CallError {
                code: ErrorCode::ExecutionError,
                message: "boom".into(),
            },
            metadata(),
        );
        assert!(!err.is_success());
        assert!(err.result().is_none());
        assert_eq!(err.error().map(|e| e.code), Some(ErrorCode::ExecutionError));
    }
}
