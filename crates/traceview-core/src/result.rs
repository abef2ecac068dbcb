//! Result types for trace output.
//!
//! These types match the JSON shape consumed by the visualization frontend
//! (`hop`, `ttl`, `hostname`, `ip`, `pingTime` per hop).

use serde::{Deserialize, Serialize};

/// A single hop on the traced path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    /// Position of the hop on the path, starting at 1.
    pub hop: u32,
    /// TTL used to reach this hop. Mirrors `hop`.
    pub ttl: u32,
    /// Hostname reported for the hop, `"Timeout"` for a fully timed-out hop,
    /// `"Unknown"` when no hostname could be extracted.
    pub hostname: String,
    /// IP address reported for the hop, `"*"` for a fully timed-out hop,
    /// `"Unknown"` when no address could be recovered.
    pub ip: String,
    /// Rounded mean of the successfully parsed RTT samples, in milliseconds.
    /// 0 when the hop fully timed out.
    #[serde(rename = "pingTime")]
    pub ping_time: u32,
}

impl Hop {
    /// A hop where no probe elicited a response.
    pub fn timed_out(hop: u32) -> Self {
        Self {
            hop,
            ttl: hop,
            hostname: "Timeout".to_string(),
            ip: "*".to_string(),
            ping_time: 0,
        }
    }
}

/// A complete, normalized trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceResult {
    /// Unique identifier for this trace (`trace_` prefix).
    pub id: String,
    /// Display name, defaulting to `Trace to {host}`.
    pub name: String,
    /// The host that was traced, as supplied by the caller.
    pub host: String,
    /// Unix timestamp (seconds) of when the trace completed.
    pub timestamp: u64,
    /// Hops in ascending order.
    pub hops: Vec<Hop>,
}

impl TraceResult {
    /// Serializes the result to JSON with indentation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the result to compact JSON.
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
