//! Injectable sink for parse decisions.
//!
//! Parsing never fails outright; ambiguous lines are resolved through
//! fallbacks. The sink makes those decisions observable without hard-wiring
//! a logging dependency into the engine.

use crate::rules::RuleName;

/// A single parse decision.
#[derive(Debug, Clone, Copy)]
pub enum ParseEvent<'a> {
    /// The classifier selected the first hop line.
    FirstHopLine { index: usize },
    /// A terminal marker line was discarded.
    TerminalMarker { line: &'a str },
    /// No probe on this line elicited a response.
    FullTimeout { hop: u32 },
    /// Some probes timed out, others responded.
    PartialTimeout { hop: u32 },
    /// A cascade rule extracted hostname and address.
    RuleMatched {
        hop: u32,
        rule: RuleName,
        hostname: &'a str,
        ip: &'a str,
    },
    /// No rule matched; the residual was used verbatim as the hostname.
    ResidualFallback { hop: u32, residual: &'a str },
    /// The extracted hostname failed the sanity check.
    HostnameRejected { hop: u32, rejected: &'a str },
    /// The address was recovered by re-scanning the raw line.
    IpRecovered { hop: u32, ip: &'a str },
}

/// Receives parse decisions as they are made.
pub trait ParseSink {
    /// Records one parse decision.
    fn record(&self, event: ParseEvent<'_>);
}

/// Default sink: forwards parse decisions to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ParseSink for TracingSink {
    fn record(&self, event: ParseEvent<'_>) {
        match event {
            ParseEvent::FirstHopLine { index } => {
                tracing::debug!(index, "Selected first hop line");
            }
            ParseEvent::TerminalMarker { line } => {
                tracing::debug!(line, "Discarded terminal marker");
            }
            ParseEvent::FullTimeout { hop } => {
                tracing::debug!(hop, "Complete timeout");
            }
            ParseEvent::PartialTimeout { hop } => {
                tracing::debug!(hop, "Partial timeout");
            }
            ParseEvent::RuleMatched {
                hop,
                rule,
                hostname,
                ip,
            } => {
                tracing::debug!(hop, rule = rule.as_str(), hostname, ip, "Rule matched");
            }
            ParseEvent::ResidualFallback { hop, residual } => {
                tracing::debug!(hop, residual, "No rule matched, residual used as hostname");
            }
            ParseEvent::HostnameRejected { hop, rejected } => {
                tracing::debug!(hop, rejected, "Hostname failed sanity check");
            }
            ParseEvent::IpRecovered { hop, ip } => {
                tracing::debug!(hop, ip, "Address recovered from raw line");
            }
        }
    }
}

/// Sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ParseSink for NullSink {
    fn record(&self, _event: ParseEvent<'_>) {}
}
