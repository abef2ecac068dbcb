//! Dialect-aware parsing of traceroute output into normalized hops.
//!
//! The engine is a pure function of `(lines, dialect)`: no clock, no
//! randomness, no environment inspection, so any number of invocations can
//! run in parallel. Entry points:
//!
//! - [`parse_output`]: classify, parse, and normalize in one step
//! - [`parse_hops`]: same without the hop-1 normalization
//! - [`normalize::normalize_hops`]: the normalization step alone
//!
//! Parse decisions (matched cascade rule, triggered fallback) are reported
//! through an injectable [`ParseSink`]; pass [`TracingSink`] to get them as
//! `tracing` debug events, or [`NullSink`] to drop them.

pub mod classify;
pub mod normalize;
pub mod rules;
pub mod sink;
pub mod unix;
pub mod windows;

pub use rules::RuleName;
pub use sink::{NullSink, ParseEvent, ParseSink, TracingSink};

use once_cell::sync::Lazy;
use regex::Regex;
use traceview_core::{Dialect, Hop};

static HOP_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+").expect("hardcoded pattern"));

/// Parses raw tool output into hops, without normalization.
///
/// Skips the banner/header block, empty lines, and lines that do not start
/// with a hop number; dispatches the rest to the dialect's line parser.
pub fn parse_hops(lines: &[String], dialect: Dialect, sink: &dyn ParseSink) -> Vec<Hop> {
    let start = classify::first_hop_index(lines, dialect);
    sink.record(ParseEvent::FirstHopLine { index: start });

    let mut hops = Vec::new();
    for line in lines.get(start..).unwrap_or_default() {
        let line = line.trim();
        if line.is_empty() || !HOP_LINE_RE.is_match(line) {
            continue;
        }

        let hop = match dialect {
            Dialect::Windows => windows::parse_windows_line(line, sink),
            Dialect::Unix => unix::parse_unix_line(line, sink),
        };
        if let Some(hop) = hop {
            hops.push(hop);
        }
    }
    hops
}

/// Parses raw tool output into the final, normalized hop list.
pub fn parse_output(lines: &[String], dialect: Dialect, sink: &dyn ParseSink) -> Vec<Hop> {
    let mut hops = parse_hops(lines, dialect, sink);
    normalize::normalize_hops(&mut hops);
    hops
}

/// Rounded mean of RTT samples; 0 when there are none.
pub(crate) fn mean_rounded(samples: &[f64]) -> u32 {
    if samples.is_empty() {
        return 0;
    }
    (samples.iter().sum::<f64>() / samples.len() as f64).round() as u32
}
