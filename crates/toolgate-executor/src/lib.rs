//! # Toolgate Executor
//!
//! Orchestrates tool invocations: resolves the provider, checks scope, looks
//! up the tool, validates parameters, dispatches over the right transport (or
//! to an in-process builtin handler), and normalizes every outcome into a
//! response envelope. Each invocation leaves exactly one call-log record and,
//! on success, a usage-counter increment.

pub mod builtin;
pub mod executor;

pub use builtin::{BuiltinHandler, BuiltinHandlers};
pub use executor::{Executor, ExecutorBuilder};
