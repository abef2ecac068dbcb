//! CLI for traceview.

use clap::Parser;
use std::process::ExitCode;
use traceview_core::{Dialect, TraceOptions};

/// Traceview - structured traceroute runner.
#[derive(Parser, Debug)]
#[command(name = "traceview")]
#[command(version)]
#[command(about = "Traceview - run a traceroute and emit structured JSON")]
pub struct Args {
    /// Target hostname or IP address.
    #[arg(required = true)]
    pub target: String,

    /// Display name for the trace.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Maximum number of hops.
    #[arg(short = 'm', long = "max-hops", default_value = "30")]
    pub max_hops: u32,

    /// Timeout per probe in seconds.
    #[arg(short = 'w', long, default_value = "5")]
    pub timeout: u32,

    /// Number of probes per hop.
    #[arg(short = 'q', long, default_value = "3")]
    pub queries: u32,

    /// Output dialect override (windows, unix). Defaults to the running OS.
    #[arg(long)]
    pub dialect: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    fn to_options(&self) -> TraceOptions {
        TraceOptions {
            max_hops: self.max_hops,
            timeout: self.timeout,
            queries: self.queries,
        }
    }

    fn dialect(&self) -> Result<Dialect, String> {
        match &self.dialect {
            Some(raw) => raw.parse().map_err(|e| format!("Invalid dialect: {}", e)),
            None => Ok(Dialect::native()),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging to stderr so stdout stays pure JSON
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("info")
            .with_writer(std::io::stderr)
            .init();
    }

    let dialect = match args.dialect() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        target = %args.target,
        %dialect,
        max_hops = args.max_hops,
        "Starting trace"
    );

    let result = traceview_exec::trace_with(
        &args.target,
        args.name.as_deref(),
        &args.to_options(),
        dialect,
        &traceview_exec::SystemExecutor,
    )
    .await;

    match result {
        Ok(trace) => match trace.to_json() {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("Trace failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
