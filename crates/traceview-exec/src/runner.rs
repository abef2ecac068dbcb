//! The trace orchestrator: validate, execute, parse, assemble.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};
use traceview_core::{Dialect, TraceError, TraceOptions, TraceResult};
use traceview_parser::TracingSink;
use uuid::Uuid;

use crate::command::build_command;
use crate::process::{CommandExecutor, SystemExecutor};

/// Runs a full trace against `host` through the given executor.
///
/// Validation happens before anything is spawned: an empty host and
/// out-of-range options are rejected as invalid input. A non-zero exit
/// surfaces as [`TraceError::CommandFailed`] with stderr (or, when stderr is
/// empty, stdout) as detail; a clean exit with zero stdout lines surfaces as
/// [`TraceError::NoOutput`]. Parsing zero hops out of captured lines is not
/// an error, the result just carries an empty hop list.
pub async fn trace_with(
    host: &str,
    name: Option<&str>,
    options: &TraceOptions,
    dialect: Dialect,
    executor: &dyn CommandExecutor,
) -> Result<TraceResult, TraceError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(TraceError::EmptyHost);
    }
    options.validate()?;

    let command = build_command(host, options, dialect);
    info!(host, %dialect, command = %command.display(), "starting trace");

    let output = executor.run(&command).await?;
    if output.status_code != 0 {
        warn!(
            host,
            code = output.status_code,
            stderr = %output.stderr.trim(),
            "trace command failed"
        );
        let detail = if output.stderr.trim().is_empty() {
            output.lines.join("\n")
        } else {
            output.stderr.trim().to_string()
        };
        return Err(TraceError::CommandFailed {
            code: output.status_code,
            detail,
        });
    }
    if output.lines.is_empty() {
        return Err(TraceError::NoOutput);
    }

    let hops = traceview_parser::parse_output(&output.lines, dialect, &TracingSink);
    debug!(host, hops = hops.len(), "trace parsed");

    Ok(TraceResult {
        id: format!("trace_{}", Uuid::new_v4().simple()),
        name: name
            .map(str::to_string)
            .unwrap_or_else(|| format!("Trace to {host}")),
        host: host.to_string(),
        timestamp: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        hops,
    })
}

/// Convenience wrapper: native dialect, real process executor.
pub async fn run_trace(
    host: &str,
    name: Option<&str>,
    options: &TraceOptions,
) -> Result<TraceResult, TraceError> {
    trace_with(host, name, options, Dialect::native(), &SystemExecutor).await
}
