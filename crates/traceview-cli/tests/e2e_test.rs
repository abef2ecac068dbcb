//! End-to-end tests for the traceview CLI.
//!
//! The ignored tests run the actual binary against real targets, which needs
//! a traceroute tool on PATH and network access. The remaining tests verify
//! the JSON output contract without running anything.

use serde::Deserialize;
use std::process::{Command, Stdio};
use std::time::Duration;

const LOCALHOST_TARGET: &str = "127.0.0.1";
const PUBLIC_TARGET: &str = "github.com";

/// Result structure matching the JSON output.
#[derive(Debug, Deserialize)]
struct TraceResult {
    id: String,
    name: String,
    host: String,
    timestamp: u64,
    hops: Vec<TraceHop>,
}

#[derive(Debug, Deserialize)]
struct TraceHop {
    hop: u32,
    ttl: u32,
    hostname: String,
    ip: String,
    #[serde(rename = "pingTime")]
    ping_time: u32,
}

/// Get the CLI binary path.
fn get_cli_binary() -> String {
    if let Ok(executable) = std::env::var("EXECUTABLE") {
        if std::path::Path::new(&executable).exists() {
            return executable;
        }
    }

    let binary_name = if cfg!(target_os = "windows") {
        "traceview.exe"
    } else {
        "traceview"
    };

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace_root = std::path::Path::new(&manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    for dir in ["target/release", "target/debug"] {
        let path = workspace_root.join(dir).join(binary_name);
        if path.exists() {
            return path.to_string_lossy().to_string();
        }
    }

    panic!(
        "CLI binary not found. Please build with 'cargo build' first. \
         Searched in workspace root: {:?}, EXECUTABLE env: {:?}",
        workspace_root,
        std::env::var("EXECUTABLE").ok()
    );
}

/// Run the CLI and parse its stdout as a trace result.
fn run_cli(target: &str, extra_args: &[&str]) -> Result<TraceResult, String> {
    let binary = get_cli_binary();

    let mut child = Command::new(&binary)
        .args(extra_args)
        .arg(target)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to spawn CLI: {}", e))?;

    let timeout = Duration::from_secs(120);
    let start = std::time::Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(format!("CLI timed out after {:?}", timeout));
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(e) => return Err(format!("Error waiting for CLI: {}", e)),
        }
    };

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    if let Some(mut out) = child.stdout.take() {
        use std::io::Read;
        let _ = out.read_to_end(&mut stdout);
    }
    if let Some(mut err) = child.stderr.take() {
        use std::io::Read;
        let _ = err.read_to_end(&mut stderr);
    }

    let stderr = String::from_utf8_lossy(&stderr);
    if !stderr.is_empty() {
        eprintln!("CLI stderr:\n{}", stderr);
    }
    if !status.success() {
        return Err(format!("CLI failed with status {}:\n{}", status, stderr));
    }

    let stdout = String::from_utf8_lossy(&stdout);
    serde_json::from_str(&stdout)
        .map_err(|e| format!("Failed to parse JSON output: {}\nOutput: {}", e, stdout))
}

/// Validations that hold for any successful trace.
fn validate_result(result: &TraceResult, target: &str) {
    let id_regex = regex::Regex::new(r"^trace_[0-9a-f]{32}$").unwrap();
    assert!(
        id_regex.is_match(&result.id),
        "id '{}' should match trace_<uuid>",
        result.id
    );
    assert_eq!(result.host, target);
    assert!(!result.name.is_empty());
    assert!(result.timestamp > 0);

    assert!(!result.hops.is_empty(), "should have at least one hop");
    assert_eq!(result.hops[0].hop, 1, "first hop should be hop 1");
    assert_eq!(result.hops[0].hostname, "localhost");
    assert_eq!(result.hops[0].ip, "127.0.0.1");

    for (idx, hop) in result.hops.iter().enumerate() {
        assert_eq!(
            hop.hop,
            idx as u32 + 1,
            "hop numbers should be sequential from 1"
        );
        assert_eq!(hop.ttl, hop.hop);
        assert!(!hop.hostname.is_empty());
        assert!(!hop.ip.is_empty());
        let _ = hop.ping_time;
    }
}

// =============================================================================
// Binary Tests
// =============================================================================

#[test]
#[ignore] // Requires a traceroute tool on PATH
fn test_localhost_trace() {
    let result = run_cli(LOCALHOST_TARGET, &[]).expect("localhost trace should succeed");
    validate_result(&result, LOCALHOST_TARGET);
}

#[test]
#[ignore] // Requires a traceroute tool on PATH and network access
fn test_public_trace() {
    let result = run_cli(PUBLIC_TARGET, &["--max-hops", "20", "--timeout", "3"])
        .expect("public trace should succeed");
    validate_result(&result, PUBLIC_TARGET);
}

#[test]
#[ignore] // Requires a traceroute tool on PATH
fn test_named_trace() {
    let result =
        run_cli(LOCALHOST_TARGET, &["--name", "loopback check"]).expect("trace should succeed");
    assert_eq!(result.name, "loopback check");
}

#[test]
#[ignore] // Only needs the binary, no network
fn test_rejects_out_of_range_max_hops() {
    let binary = get_cli_binary();
    let output = Command::new(&binary)
        .args(["--max-hops", "100", LOCALHOST_TARGET])
        .output()
        .expect("CLI should spawn");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max_hops"), "stderr was: {}", stderr);
}

// =============================================================================
// Output Contract Tests (no binary required)
// =============================================================================

#[test]
fn test_json_parsing_full() {
    let json = r#"{
        "id": "trace_a1b2c3d4e5f67890abcdef1234567890",
        "name": "Trace to example.com",
        "host": "example.com",
        "timestamp": 1700000000,
        "hops": [
            {"hop": 1, "ttl": 1, "hostname": "localhost", "ip": "127.0.0.1", "pingTime": 0},
            {"hop": 2, "ttl": 2, "hostname": "isp-gateway.net", "ip": "203.0.113.1", "pingTime": 2},
            {"hop": 3, "ttl": 3, "hostname": "Timeout", "ip": "*", "pingTime": 0},
            {"hop": 4, "ttl": 4, "hostname": "93.184.216.34", "ip": "93.184.216.34", "pingTime": 20}
        ]
    }"#;

    let result: TraceResult = serde_json::from_str(json).expect("Failed to parse JSON");

    assert_eq!(result.id, "trace_a1b2c3d4e5f67890abcdef1234567890");
    assert_eq!(result.host, "example.com");
    assert_eq!(result.timestamp, 1_700_000_000);
    assert_eq!(result.hops.len(), 4);
    assert_eq!(result.hops[0].hostname, "localhost");
    assert_eq!(result.hops[2].hostname, "Timeout");
    assert_eq!(result.hops[2].ip, "*");
    assert_eq!(result.hops[3].ping_time, 20);
}

#[test]
fn test_json_parsing_empty_hops() {
    let json = r#"{
        "id": "trace_00000000000000000000000000000000",
        "name": "Trace to example.com",
        "host": "example.com",
        "timestamp": 1700000000,
        "hops": []
    }"#;

    let result: TraceResult = serde_json::from_str(json).expect("Failed to parse JSON");
    assert!(result.hops.is_empty());
}

#[test]
fn test_validate_id_format() {
    let id_regex = regex::Regex::new(r"^trace_[0-9a-f]{32}$").unwrap();

    assert!(id_regex.is_match("trace_a1b2c3d4e5f67890abcdef1234567890"));
    assert!(!id_regex.is_match("trace_"));
    assert!(!id_regex.is_match("a1b2c3d4e5f67890abcdef1234567890"));
    assert!(!id_regex.is_match(
        "trace_a1b2c3d4-e5f6-7890-abcd-ef1234567890" // hyphenated form is not emitted
    ));
}
