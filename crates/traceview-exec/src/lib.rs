//! Command construction, external tool execution, and trace orchestration.
//!
//! The orchestrator sequences the whole pipeline: validate input, build the
//! OS-specific command, run it through a [`CommandExecutor`], parse and
//! normalize the output, and assemble a [`traceview_core::TraceResult`].
//! The executor is a trait seam so the pipeline is testable without
//! spawning real processes.

pub mod command;
pub mod process;
pub mod runner;

pub use command::{build_command, TraceCommand};
pub use process::{CapturedOutput, CommandExecutor, SystemExecutor, HARD_DEADLINE};
pub use runner::{run_trace, trace_with};
