//! Hop-line parser for the `tracert` dialect.
//!
//! ```text
//!   1    <1 ms    <1 ms    <1 ms  router.local [192.168.1.1]
//!   4     *        *        *     Request timed out.
//!   8     9 ms     9 ms     8 ms  * h-4-1.core.example.net [2607:5380:8000::19]
//! ```

use crate::mean_rounded;
use crate::rules::resolve_endpoint;
use crate::sink::{ParseEvent, ParseSink};
use once_cell::sync::Lazy;
use regex::Regex;
use traceview_core::{Dialect, Hop};

static HOP_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)").expect("hardcoded pattern"));
static MS_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\s*ms").expect("hardcoded pattern"));
static RTT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+|<\d+)\s*ms").expect("hardcoded pattern"));
static HOP_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\s+").expect("hardcoded pattern"));
static RTT_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+|<\d+)\s*ms\s+").expect("hardcoded pattern"));

/// Parses one `tracert` hop line. Returns `None` for the terminal marker and
/// for lines without a leading hop number.
pub fn parse_windows_line(line: &str, sink: &dyn ParseSink) -> Option<Hop> {
    if line.contains("Trace complete") {
        sink.record(ParseEvent::TerminalMarker { line });
        return None;
    }

    let hop: u32 = HOP_NUMBER_RE.captures(line)?[1].parse().ok()?;

    let has_star = line.contains('*');
    let has_response = MS_TOKEN_RE.is_match(line);

    // "Request timed out." or asterisks with no RTT token anywhere.
    if line.contains("Request timed out") || (has_star && !has_response) {
        sink.record(ParseEvent::FullTimeout { hop });
        return Some(Hop::timed_out(hop));
    }

    if has_star && has_response {
        sink.record(ParseEvent::PartialTimeout { hop });
    }

    // "<1 ms" counts as 1 ms.
    let samples: Vec<f64> = RTT_RE
        .captures_iter(line)
        .map(|caps| {
            let token = &caps[1];
            if token.starts_with('<') {
                1.0
            } else {
                token.parse().unwrap_or(0.0)
            }
        })
        .collect();
    let ping_time = mean_rounded(&samples);

    let without_hop = HOP_STRIP_RE.replace(line, "");
    let residual = RTT_STRIP_RE.replace_all(&without_hop, "");
    let residual = residual.trim();

    let (hostname, ip) = resolve_endpoint(hop, residual, line, Dialect::Windows, sink);

    Some(Hop {
        hop,
        ttl: hop,
        hostname,
        ip,
        ping_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;

    fn parse(line: &str) -> Option<Hop> {
        parse_windows_line(line, &NullSink)
    }

    #[test]
    fn test_sub_millisecond_tokens_count_as_one() {
        let hop = parse("  1    <1 ms    <1 ms    <1 ms  router.local [192.168.1.1]").unwrap();
        assert_eq!(hop.hop, 1);
        assert_eq!(hop.ttl, 1);
        assert_eq!(hop.hostname, "router.local");
        assert_eq!(hop.ip, "192.168.1.1");
        assert_eq!(hop.ping_time, 1);
    }

    #[test]
    fn test_rtt_average_is_rounded() {
        let hop = parse("  3    15 ms    14 ms    15 ms  core1.example.net [198.51.100.1]").unwrap();
        assert_eq!(hop.ping_time, 15); // mean 14.67
        assert_eq!(hop.hostname, "core1.example.net");
        assert_eq!(hop.ip, "198.51.100.1");
    }

    #[test]
    fn test_request_timed_out() {
        let hop = parse(" 4     *        *        *     Request timed out.").unwrap();
        assert_eq!(hop.hop, 4);
        assert_eq!(hop.ttl, 4);
        assert_eq!(hop.hostname, "Timeout");
        assert_eq!(hop.ip, "*");
        assert_eq!(hop.ping_time, 0);
    }

    #[test]
    fn test_asterisks_without_rtt_is_full_timeout() {
        let hop = parse("  9     *        *        *").unwrap();
        assert_eq!(hop.hostname, "Timeout");
        assert_eq!(hop.ip, "*");
        assert_eq!(hop.ping_time, 0);
    }

    #[test]
    fn test_partial_timeout_extracts_address_from_responses() {
        let hop = parse(
            "  8     9 ms     9 ms     8 ms  * h-4-1.core.rantoul.il.metrocomm.net [2607:5380:8000::19]",
        )
        .unwrap();
        assert_eq!(hop.hostname, "h-4-1.core.rantoul.il.metrocomm.net");
        assert_eq!(hop.ip, "2607:5380:8000::19");
        assert_eq!(hop.ping_time, 9); // mean 8.67
    }

    #[test]
    fn test_bare_address() {
        let hop = parse("  5    10 ms     9 ms    11 ms  10.0.0.1").unwrap();
        assert_eq!(hop.hostname, "10.0.0.1");
        assert_eq!(hop.ip, "10.0.0.1");
        assert_eq!(hop.ping_time, 10);
    }

    #[test]
    fn test_bracketed_address_alone() {
        let hop = parse("  6    12 ms    11 ms    12 ms  [10.0.0.2]").unwrap();
        assert_eq!(hop.hostname, "IPv6-Host");
        assert_eq!(hop.ip, "10.0.0.2");
        assert_eq!(hop.ping_time, 12);
    }

    #[test]
    fn test_hostname_only_recovers_ip_from_raw_line() {
        let hop = parse("  7    14 ms    13 ms    14 ms  some-router.example.com").unwrap();
        assert_eq!(hop.hostname, "some-router.example.com");
        // The raw-line rescan is loose by design and picks up the first
        // hex-like token, here the hop number itself.
        assert_eq!(hop.ip, "7");
        assert_eq!(hop.ping_time, 14);
    }

    #[test]
    fn test_trace_complete_is_discarded() {
        assert!(parse("Trace complete.").is_none());
    }

    #[test]
    fn test_line_without_hop_number_is_discarded() {
        assert!(parse("over a maximum of 30 hops:").is_none());
    }

}
