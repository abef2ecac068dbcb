//! Spawning the external tracing tool and capturing its output.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use traceview_core::TraceError;

use crate::command::TraceCommand;

/// Upper bound on how long a single trace process may run. Traces that a
/// tool cannot finish within this window are killed and reported as
/// [`TraceError::DeadlineExceeded`].
pub const HARD_DEADLINE: Duration = Duration::from_secs(300);

/// What came back from a finished (or killed) trace process.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    /// Stdout split into lines, each with trailing whitespace removed.
    pub lines: Vec<String>,
    /// Stderr as a single string.
    pub stderr: String,
    /// Process exit code; -1 when the process died without one.
    pub status_code: i32,
}

/// Seam between the orchestrator and the operating system.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn run(&self, command: &TraceCommand) -> Result<CapturedOutput, TraceError>;
}

/// Executor that spawns the real tool via [`tokio::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

#[async_trait]
impl CommandExecutor for SystemExecutor {
    async fn run(&self, command: &TraceCommand) -> Result<CapturedOutput, TraceError> {
        debug!(command = %command.display(), "spawning trace process");

        let mut child = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| TraceError::SpawnFailed {
                command: command.display(),
                source,
            })?;

        // Drain both pipes concurrently with waiting on the child, so a
        // chatty tool cannot deadlock against a full pipe buffer.
        let stdout = child.stdout.take().ok_or(TraceError::Internal(
            "child stdout was not piped".to_string(),
        ))?;
        let stderr = child.stderr.take().ok_or(TraceError::Internal(
            "child stderr was not piped".to_string(),
        ))?;

        let stdout_task = tokio::spawn(async move {
            let mut lines = Vec::new();
            let mut reader = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = reader.next_line().await {
                lines.push(line.trim_end().to_string());
            }
            lines
        });
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            let mut reader = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = reader.next_line().await {
                buf.push_str(&line);
                buf.push('\n');
            }
            buf
        });

        let status = match tokio::time::timeout(HARD_DEADLINE, child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                let _ = child.kill().await;
                let _ = child.wait().await;
                return Err(TraceError::DeadlineExceeded(HARD_DEADLINE.as_secs()));
            }
        };

        let lines = stdout_task
            .await
            .map_err(|e| TraceError::Internal(format!("stdout reader task failed: {e}")))?;
        let stderr = stderr_task
            .await
            .map_err(|e| TraceError::Internal(format!("stderr reader task failed: {e}")))?;

        Ok(CapturedOutput {
            lines,
            stderr,
            status_code: status.code().unwrap_or(-1),
        })
    }
}
