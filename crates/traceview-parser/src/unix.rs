//! Hop-line parser for the `traceroute` dialect.
//!
//! ```text
//!  1  router.local (192.168.1.1)  0.123 ms  0.456 ms  0.789 ms
//!  3  * * *
//!  5  * 10.0.0.2  7.890 ms  8.012 ms
//! ```

use crate::mean_rounded;
use crate::rules::resolve_endpoint;
use crate::sink::{ParseEvent, ParseSink};
use once_cell::sync::Lazy;
use regex::Regex;
use traceview_core::{Dialect, Hop};

static HOP_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)").expect("hardcoded pattern"));
static FULL_TIMEOUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s+\*\s+\*\s+\*").expect("hardcoded pattern"));
static MS_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\d+\s*ms").expect("hardcoded pattern"));
static RTT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+\.\d+)\s*ms").expect("hardcoded pattern"));
static HOP_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\s+").expect("hardcoded pattern"));
static RTT_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+\d+\.\d+\s*ms").expect("hardcoded pattern"));

/// Parses one `traceroute` hop line. Returns `None` for lines without a
/// leading hop number.
pub fn parse_unix_line(line: &str, sink: &dyn ParseSink) -> Option<Hop> {
    let hop: u32 = HOP_NUMBER_RE.captures(line)?[1].parse().ok()?;

    // Three asterisks right after the hop number.
    if FULL_TIMEOUT_RE.is_match(line) {
        sink.record(ParseEvent::FullTimeout { hop });
        return Some(Hop::timed_out(hop));
    }

    if line.contains('*') && MS_TOKEN_RE.is_match(line) {
        sink.record(ParseEvent::PartialTimeout { hop });
    }

    let without_hop = HOP_STRIP_RE.replace(line, "");
    let residual = RTT_STRIP_RE.replace_all(&without_hop, "");
    let residual = residual.trim();

    let (hostname, ip) = resolve_endpoint(hop, residual, line, Dialect::Unix, sink);

    let samples: Vec<f64> = RTT_RE
        .captures_iter(line)
        .filter_map(|caps| caps[1].parse().ok())
        .collect();
    let ping_time = mean_rounded(&samples);

    Some(Hop {
        hop,
        ttl: hop,
        hostname,
        ip,
        ping_time,
    })
}
