//! OS-specific construction of the route-tracing command.

use traceview_core::{Dialect, TraceOptions};

/// A program and its argument vector, ready to spawn without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl TraceCommand {
    /// Single-string rendering for logs and error messages.
    pub fn display(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            out.push_str(arg);
        }
        out
    }
}

/// Builds the tracing command for `host` under the given dialect.
///
/// IPv6 targets are detected by the presence of `:` in the host. Windows
/// `tracert` takes its timeout in milliseconds and has no queries flag;
/// Unix uses `traceroute6` for IPv6 targets.
pub fn build_command(host: &str, options: &TraceOptions, dialect: Dialect) -> TraceCommand {
    let is_v6 = host.contains(':');

    match dialect {
        Dialect::Windows => {
            let mut args = Vec::new();
            if is_v6 {
                args.push("-6".to_string());
            }
            args.extend([
                "-h".to_string(),
                options.max_hops.to_string(),
                "-w".to_string(),
                (options.timeout * 1000).to_string(),
                host.to_string(),
            ]);
            TraceCommand {
                program: "tracert".to_string(),
                args,
            }
        }
        Dialect::Unix => TraceCommand {
            program: if is_v6 { "traceroute6" } else { "traceroute" }.to_string(),
            args: vec![
                "-m".to_string(),
                options.max_hops.to_string(),
                "-w".to_string(),
                options.timeout.to_string(),
                "-q".to_string(),
                options.queries.to_string(),
                host.to_string(),
            ],
        },
    }
}
