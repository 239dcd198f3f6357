//! # Toolgate Core
//!
//! Core types for the Toolgate tool-invocation engine: scopes, tool
//! definitions, connection descriptors, call envelopes, the error taxonomy,
//! and the parameter validator.
//!
//! This crate is pure data and logic, with no I/O and no async. Transports
//! and the executor build on top of it.

pub mod connection;
pub mod error;
pub mod request;
pub mod response;
pub mod scope;
pub mod tool;
pub mod validate;

pub use connection::{ConnectionDescriptor, HttpConnection, StdioConnection, WebSocketConnection};
pub use error::{ErrorCode, ExecuteError, ParamError};
pub use request::{CallContext, CallRequest};
pub use response::{CallError, CallMetadata, CallResponse};
pub use scope::{ProviderScope, Scope};
pub use tool::{ParamType, ToolDefinition, ToolParameter};
pub use validate::validate_params;
