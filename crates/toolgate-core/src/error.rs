//! Error taxonomy for tool invocation.
//!
//! Every failure a caller can observe is one of five codes. Transport- and
//! handler-level failures of any shape are collapsed into `EXECUTION_ERROR`
//! at the executor boundary; nothing transport-native ever crosses it.

use crate::scope::{ProviderScope, Scope};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable machine-readable failure codes surfaced in the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "MCP_NOT_FOUND")]
    McpNotFound,
    #[serde(rename = "SCOPE_MISMATCH")]
    ScopeMismatch,
    #[serde(rename = "TOOL_NOT_FOUND")]
    ToolNotFound,
    #[serde(rename = "INVALID_PARAMS")]
    InvalidParams,
    #[serde(rename = "EXECUTION_ERROR")]
    ExecutionError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::McpNotFound => "MCP_NOT_FOUND",
            ErrorCode::ScopeMismatch => "SCOPE_MISMATCH",
            ErrorCode::ToolNotFound => "TOOL_NOT_FOUND",
            ErrorCode::InvalidParams => "INVALID_PARAMS",
            ErrorCode::ExecutionError => "EXECUTION_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parameter validation violation.
///
/// Validation stops at the first violation in declaration order, so exactly
/// one of these is ever produced per failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("missing required parameter '{name}'")]
    MissingRequired { name: String },

    #[error("parameter '{name}' must be of type {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("parameter '{name}' must be one of: {}", allowed.join(", "))]
    NotAllowed { name: String, allowed: Vec<String> },
}

/// A failed invocation, classified by stage.
///
/// Each variant maps onto exactly one [`ErrorCode`]; the executor turns this
/// into the failure half of the response envelope.
#[derive(Debug, Clone, Error)]
pub enum ExecuteError {
    #[error("MCP provider '{provider_id}' not found")]
    ProviderNotFound { provider_id: String },

    #[error("provider '{provider_id}' is scoped to {expected}, not {given}")]
    ScopeMismatch {
        provider_id: String,
        expected: ProviderScope,
        given: Scope,
    },

    #[error("tool '{tool}' not found on provider '{provider_id}'")]
    ToolNotFound { provider_id: String, tool: String },

    #[error("invalid parameters: {source}")]
    InvalidParams {
        #[from]
        source: ParamError,
    },

    #[error("execution failed: {message}")]
    Execution { message: String, timed_out: bool },
}

impl ExecuteError {
    /// Wrap a transport or handler failure message.
    pub fn execution(message: impl Into<String>) -> Self {
        ExecuteError::Execution {
            message: message.into(),
            timed_out: false,
        }
    }

    /// The stable code this failure is surfaced under.
    pub fn code(&self) -> ErrorCode {
        match self {
            ExecuteError::ProviderNotFound { .. } => ErrorCode::McpNotFound,
            ExecuteError::ScopeMismatch { .. } => ErrorCode::ScopeMismatch,
            ExecuteError::ToolNotFound { .. } => ErrorCode::ToolNotFound,
            ExecuteError::InvalidParams { .. } => ErrorCode::InvalidParams,
            ExecuteError::Execution { .. } => ErrorCode::ExecutionError,
        }
    }

    /// Whether this failure was a transport timeout. Used for log status
    /// classification only; the surfaced code is still `EXECUTION_ERROR`.
    pub fn timed_out(&self) -> bool {
        matches!(self, ExecuteError::Execution { timed_out: true, .. })
    }
}
