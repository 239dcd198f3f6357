//! Subprocess transport.
//!
//! One child process per invocation: spawn, write the request as a single
//! JSON-RPC line, close stdin, wait for exit, parse stdout. The wall-clock
//! timeout covers the whole lifecycle; on expiry the child is killed so no
//! orphan survives the call.

use crate::error::TransportError;
use crate::wire::{RpcRequest, RpcResponse};
use serde_json::{Map, Value};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use toolgate_core::StdioConnection;
use tracing::debug;

/// Spawns a provider's command and speaks line-framed JSON-RPC over its
/// standard streams.
#[derive(Debug, Default)]
pub struct StdioTransport {
    next_id: AtomicU64,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
        }
    }

    /// Invoke `tool` with `params` over the subprocess described by `conn`.
    pub async fn invoke(
        &self,
        conn: &StdioConnection,
        tool: &str,
        params: &Map<String, Value>,
    ) -> Result<Value, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let line = RpcRequest::new(tool, params, id).to_line()?;
        let timeout_ms = conn.timeout_ms();

        debug!(command = %conn.command, tool, timeout_ms, "spawning stdio provider");

        let mut child = Command::new(&conn.command)
            .args(&conn.args)
            .envs(&conn.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| TransportError::Spawn {
                command: conn.command.clone(),
                message: err.to_string(),
            })?;

        let outcome = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            Self::exchange(&mut child, &line),
        )
        .await;

        match outcome {
            Ok(result) => result,
            Err(_) => {
                // Kill and reap before reporting, so the timeout never
                // leaves a live child behind.
                let _ = child.kill().await;
                Err(TransportError::Timeout { timeout_ms })
            }
        }
    }

    /// Write the request line, close stdin, drain both output streams, and
    /// wait for the child to exit.
    async fn exchange(
        child: &mut tokio::process::Child,
        line: &str,
    ) -> Result<Value, TransportError> {
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| TransportError::io("child stdin was not piped"))?;
        stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|err| TransportError::io(format!("failed to write request: {err}")))?;
        stdin
            .write_all(b"\n")
            .await
            .map_err(|err| TransportError::io(format!("failed to write request: {err}")))?;
        stdin
            .shutdown()
            .await
            .map_err(|err| TransportError::io(format!("failed to close stdin: {err}")))?;
        drop(stdin);

        let mut stdout_pipe = child
            .stdout
            .take()
            .ok_or_else(|| TransportError::io("child stdout was not piped"))?;
        let mut stderr_pipe = child
            .stderr
            .take()
            .ok_or_else(|| TransportError::io("child stderr was not piped"))?;

        // Drain both streams concurrently with waiting, otherwise a chatty
        // child can fill a pipe buffer and deadlock against us.
        let stdout_task = tokio::spawn(async move {
            let mut buf = String::new();
            let _ = stdout_pipe.read_to_string(&mut buf).await;
            buf
        });
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            let _ = stderr_pipe.read_to_string(&mut buf).await;
            buf
        });

        let status = child
            .wait()
            .await
            .map_err(|err| TransportError::io(format!("failed to wait for child: {err}")))?;
        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();

        if !status.success() {
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(TransportError::ProcessExit {
                code: status.code(),
                detail,
            });
        }

        RpcResponse::parse(&stdout)?.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolgate_core::StdioConnection;

    fn shell(script: &str) -> StdioConnection {
        StdioConnection::new("sh").with_args(["-c", script])
    }

    #[tokio::test]
    async fn echoes_result_from_child() {
        let conn = shell(r#"echo '{"jsonrpc":"2.0","result":{"ok":true},"id":1}'"#);
        let transport = StdioTransport::new();

        let result = transport.invoke(&conn, "ping", &Map::new()).await.unwrap();
        assert_eq!(result, json!({"ok": true}));
    }

    #[tokio::test]
    async fn child_reads_the_request_line() {
        // The child echoes the request's method back as the result.
        let conn = shell(
            r#"read line; method=$(printf '%s' "$line" | sed 's/.*"method":"\([^"]*\)".*/\1/'); printf '{"jsonrpc":"2.0","result":"%s","id":1}\n' "$method""#,
        );
        let transport = StdioTransport::new();

        let result = transport.invoke(&conn, "forecast", &Map::new()).await.unwrap();
        assert_eq!(result, json!("forecast"));
    }

    #[tokio::test]
    async fn rpc_error_from_child_is_surfaced() {
        let conn = shell(r#"echo '{"jsonrpc":"2.0","error":{"code":-1,"message":"boom"},"id":1}'"#);
        let transport = StdioTransport::new();

        let err = transport.invoke(&conn, "ping", &Map::new()).await.unwrap_err();
        assert!(matches!(err, TransportError::Rpc { ref message } if message == "boom"));
    }

    #[tokio::test]
    async fn nonzero_exit_carries_stderr() {
        let conn = shell(r#"echo 'missing API key' >&2; exit 3"#);
        let transport = StdioTransport::new();

        let err = transport.invoke(&conn, "ping", &Map::new()).await.unwrap_err();
        match err {
            TransportError::ProcessExit { code, detail } => {
                assert_eq!(code, Some(3));
                assert_eq!(detail, "missing API key");
            }
            other => panic!("expected ProcessExit, got {other}"),
        }
    }

    #[tokio::test]
    async fn garbage_stdout_is_malformed() {
        let conn = shell(r#"echo 'not json at all'"#);
        let transport = StdioTransport::new();

        let err = transport.invoke(&conn, "ping", &Map::new()).await.unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse { .. }));
    }

    /// Whether a process with this pid still exists.
    fn process_alive(pid: &str) -> bool {
        std::process::Command::new("sh")
            .args(["-c", &format!("kill -0 {pid}")])
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    #[tokio::test]
    async fn slow_child_times_out_and_is_killed() {
        // The child records its own pid, then hangs well past the timeout.
        let pid_file =
            std::env::temp_dir().join(format!("toolgate-stdio-pid-{}", std::process::id()));
        let script = format!("printf '%s' \"$$\" > {}; exec sleep 30", pid_file.display());
        let conn = shell(&script).with_timeout_ms(100);
        let transport = StdioTransport::new();

        let start = std::time::Instant::now();
        let err = transport.invoke(&conn, "ping", &Map::new()).await.unwrap_err();
        assert!(err.is_timeout());
        assert!(start.elapsed() < Duration::from_secs(5));

        // Killed and reaped before invoke returned: nothing left running.
        let pid = std::fs::read_to_string(&pid_file).unwrap();
        assert!(
            !process_alive(pid.trim()),
            "child {pid} is still running after the timeout"
        );
        let _ = std::fs::remove_file(&pid_file);
    }

    #[tokio::test]
    async fn missing_command_is_a_spawn_error() {
        let conn = StdioConnection::new("definitely-not-a-real-binary-4cf1");
        let transport = StdioTransport::new();

        let err = transport.invoke(&conn, "ping", &Map::new()).await.unwrap_err();
        assert!(matches!(err, TransportError::Spawn { ref command, .. }
            if command == "definitely-not-a-real-binary-4cf1"));
    }

    #[tokio::test]
    async fn env_overrides_reach_the_child() {
        let conn = shell(r#"printf '{"jsonrpc":"2.0","result":"%s","id":1}\n' "$TOOLGATE_TEST_ENV""#)
            .with_env("TOOLGATE_TEST_ENV", "hello");
        let transport = StdioTransport::new();

        let result = transport.invoke(&conn, "ping", &Map::new()).await.unwrap();
        assert_eq!(result, json!("hello"));
    }
}
