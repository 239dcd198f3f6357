//! # Toolgate Transport
//!
//! Carries a single request/response pair across a specific connection
//! medium. One adapter per connection kind:
//!
//! - [`StdioTransport`]: spawn a child process, speak line-framed JSON-RPC
//!   over its standard streams, enforce a wall-clock timeout;
//! - [`HttpTransport`]: POST the same JSON-RPC envelope to a fixed URL;
//! - [`WebSocketTransport`]: reserved; fails deterministically.
//!
//! The shared envelope shape means a provider can move between stdio and
//! HTTP without touching its tool definitions. Every failure is mapped onto
//! [`TransportError`] at the adapter boundary; no transport-native error type
//! leaks past it.

pub mod error;
pub mod http;
pub mod set;
pub mod stdio;
pub mod websocket;
pub mod wire;

pub use error::TransportError;
pub use http::HttpTransport;
pub use set::TransportSet;
pub use stdio::StdioTransport;
pub use websocket::WebSocketTransport;
pub use wire::{RpcErrorBody, RpcRequest, RpcResponse};
