//! Invocation orchestrator.
//!
//! Drives one call through resolve, scope check, tool lookup, parameter
//! validation, dispatch, and normalization, then writes exactly one call-log
//! record and (on success) bumps the usage counter. Any stage can
//! short-circuit; whatever happens, the caller gets a response envelope and
//! the log gets its record.

use crate::builtin::BuiltinHandlers;
use chrono::Utc;
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use toolgate_core::{
    CallError, CallMetadata, CallRequest, CallResponse, ExecuteError, ProviderScope, Scope,
    validate_params,
};
use toolgate_registry::{
    CallLogRecord, CallLogSink, CallStatus, InMemoryCallLog, ProviderRegistry,
};
use toolgate_transport::TransportSet;
use tracing::{debug, warn};

/// Executes tool calls against registered providers.
pub struct Executor {
    registry: Arc<ProviderRegistry>,
    transports: TransportSet,
    builtins: BuiltinHandlers,
    call_log: Arc<dyn CallLogSink>,
}

impl Executor {
    pub fn builder(registry: Arc<ProviderRegistry>) -> ExecutorBuilder {
        ExecutorBuilder::new(registry)
    }

    /// Execute one call. Always returns an envelope; never panics or hangs
    /// past the transport timeout.
    pub async fn execute(&self, request: CallRequest) -> CallResponse {
        let started = Instant::now();
        let outcome = self.run(&request).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let metadata = CallMetadata {
            duration_ms,
            timestamp: Utc::now(),
            provider_id: request.provider_id.clone(),
            tool: request.tool.clone(),
            scope: request.scope,
        };

        let response = match &outcome {
            Ok(result) => CallResponse::success(result.clone(), metadata),
            Err(err) => {
                debug!(
                    provider = %request.provider_id,
                    tool = %request.tool,
                    code = %err.code(),
                    "tool call failed"
                );
                CallResponse::failure(CallError::from(err), metadata)
            }
        };

        self.log_call(&request, &outcome, duration_ms).await;
        if let (Ok(_), Some(user_id)) = (&outcome, request.user_id()) {
            self.registry.record_usage(user_id, &request.provider_id).await;
        }

        response
    }

    /// Execute a batch concurrently. Each call fails independently; the
    /// output order matches the input order.
    pub async fn execute_batch(&self, requests: Vec<CallRequest>) -> Vec<CallResponse> {
        join_all(requests.into_iter().map(|request| self.execute(request))).await
    }

    async fn run(&self, request: &CallRequest) -> Result<Value, ExecuteError> {
        let provider = self.registry.resolve(&request.provider_id).ok_or_else(|| {
            ExecuteError::ProviderNotFound {
                provider_id: request.provider_id.clone(),
            }
        })?;

        if !provider.scope.allows(request.scope) {
            return Err(ExecuteError::ScopeMismatch {
                provider_id: provider.id.clone(),
                expected: provider.scope,
                given: request.scope,
            });
        }

        let tool = provider
            .find_tool(&request.tool)
            .ok_or_else(|| ExecuteError::ToolNotFound {
                provider_id: provider.id.clone(),
                tool: request.tool.clone(),
            })?;

        validate_params(tool, &request.params)?;

        if provider.is_builtin {
            self.dispatch_builtin(&provider.scope, request).await
        } else {
            self.transports
                .invoke(&provider.connection, &request.tool, &request.params)
                .await
                .map_err(|err| ExecuteError::Execution {
                    timed_out: err.is_timeout(),
                    message: err.to_string(),
                })
        }
    }

    async fn dispatch_builtin(
        &self,
        provider_scope: &ProviderScope,
        request: &CallRequest,
    ) -> Result<Value, ExecuteError> {
        // A both-scoped builtin runs under whichever scope the call came in.
        let scope = match provider_scope {
            ProviderScope::Workspace => Scope::Workspace,
            ProviderScope::Chat => Scope::Chat,
            ProviderScope::Both => request.scope,
        };

        let handler = self.builtins.for_scope(scope).ok_or_else(|| {
            ExecuteError::execution(format!("no builtin handler configured for {scope} scope"))
        })?;

        handler
            .invoke(&request.tool, &request.params, request.context.as_ref())
            .await
            .map_err(ExecuteError::execution)
    }

    /// Append the one record this invocation produces. A failing sink is
    /// logged and swallowed.
    async fn log_call(
        &self,
        request: &CallRequest,
        outcome: &Result<Value, ExecuteError>,
        latency_ms: u64,
    ) {
        let status = match outcome {
            Ok(_) => CallStatus::Success,
            Err(ExecuteError::ScopeMismatch { .. }) => CallStatus::PermissionDenied,
            Err(err) if err.timed_out() => CallStatus::Timeout,
            Err(_) => CallStatus::Failed,
        };

        let record = CallLogRecord {
            user_id: request.user_id(),
            provider_id: request.provider_id.clone(),
            tool: request.tool.clone(),
            scope: request.scope,
            params: serde_json::to_string(&request.params).unwrap_or_else(|_| "{}".to_string()),
            result: outcome
                .as_ref()
                .ok()
                .map(|value| value.to_string()),
            status,
            latency_ms,
            error_message: outcome.as_ref().err().map(ToString::to_string),
            created_at: Utc::now(),
        };

        if let Err(err) = self.call_log.append(record).await {
            warn!(
                provider = %request.provider_id,
                tool = %request.tool,
                error = %err,
                "call log append failed"
            );
        }
    }
}

/// Wires an [`Executor`] together at startup.
pub struct ExecutorBuilder {
    registry: Arc<ProviderRegistry>,
    transports: TransportSet,
    builtins: BuiltinHandlers,
    call_log: Option<Arc<dyn CallLogSink>>,
}

impl ExecutorBuilder {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            transports: TransportSet::new(),
            builtins: BuiltinHandlers::new(),
            call_log: None,
        }
    }

    pub fn transports(mut self, transports: TransportSet) -> Self {
        self.transports = transports;
        self
    }

    pub fn builtins(mut self, builtins: BuiltinHandlers) -> Self {
        self.builtins = builtins;
        self
    }

    pub fn call_log(mut self, call_log: Arc<dyn CallLogSink>) -> Self {
        self.call_log = Some(call_log);
        self
    }

    pub fn build(self) -> Executor {
        Executor {
            registry: self.registry,
            transports: self.transports,
            builtins: self.builtins,
            call_log: self
                .call_log
                .unwrap_or_else(|| Arc::new(InMemoryCallLog::new())),
        }
    }
}
