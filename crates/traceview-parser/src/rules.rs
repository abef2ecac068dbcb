//! Ordered extraction-rule cascades for the residual address segment.
//!
//! Once the hop number and RTT tokens are stripped from a hop line, what
//! remains is the address segment: some combination of hostname, bracketed
//! or parenthesized address, leading asterisk, or bare address. Each dialect
//! resolves it through an ordered list of `(pattern, extractor)` rules,
//! first match wins. The order is load-bearing: the IPv6-shaped patterns
//! deliberately run first and also capture dotted-quad addresses, exactly as
//! the frontends consuming this output expect.

use crate::sink::{ParseEvent, ParseSink};
use once_cell::sync::Lazy;
use regex::Regex;
use traceview_core::Dialect;

/// Placeholder for values that could not be extracted.
pub(crate) const UNKNOWN: &str = "Unknown";
/// Hostname label for hops that only reported an IPv6-shaped address.
pub(crate) const IPV6_LABEL: &str = "IPv6-Host";

// Pattern atoms. A hostname is a run of word chars, dots, and hyphens,
// optionally space-separated; an IPv6-like token allows up to three trailing
// dotted-decimal groups (v4-mapped forms).
const HOST: &str = r"[\w\.-]+(?:\s+[\w\.-]+)*";
const V6: &str = r"[0-9a-fA-F:]+(?:\.\d{1,3}){0,3}";
const V4: &str = r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}";
const ADDR: &str = r"[\d\.:a-fA-F]+";

/// Identifies which cascade rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleName {
    /// `hostname [ipv6]`
    HostBracketedV6,
    /// `[ipv6]` alone
    BracketedV6,
    /// `* hostname [addr]`
    StarHostBracketedAddr,
    /// `* addr`
    StarAddr,
    /// `hostname [ipv4]`
    HostBracketedV4,
    /// `[ipv4]` alone
    BracketedV4,
    /// `hostname (ipv4)`
    HostParenV4,
    /// `hostname (ipv6)`
    HostParenV6,
    /// `(ipv4)` alone
    ParenV4,
    /// `(ipv6)` alone
    ParenV6,
    /// bare dotted-quad
    BareV4,
    /// bare IPv6-like token
    BareV6,
    /// trailing hostname run with no address
    TrailingHost,
    /// IPv6-like token anywhere in the residual
    ResidualV6,
}

impl RuleName {
    /// Short identifier for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleName::HostBracketedV6 => "host_bracketed_v6",
            RuleName::BracketedV6 => "bracketed_v6",
            RuleName::StarHostBracketedAddr => "star_host_bracketed_addr",
            RuleName::StarAddr => "star_addr",
            RuleName::HostBracketedV4 => "host_bracketed_v4",
            RuleName::BracketedV4 => "bracketed_v4",
            RuleName::HostParenV4 => "host_paren_v4",
            RuleName::HostParenV6 => "host_paren_v6",
            RuleName::ParenV4 => "paren_v4",
            RuleName::ParenV6 => "paren_v6",
            RuleName::BareV4 => "bare_v4",
            RuleName::BareV6 => "bare_v6",
            RuleName::TrailingHost => "trailing_host",
            RuleName::ResidualV6 => "residual_v6",
        }
    }
}

/// How to turn a rule's captures into `(hostname, ip)`.
#[derive(Debug, Clone, Copy)]
enum Extract {
    /// Capture 1 is the hostname, capture 2 the address.
    HostAndIp,
    /// Capture 1 is the address, reused as the hostname.
    IpAsHostname,
    /// Capture 1 is the address; the hostname is a fixed label.
    LabeledIp(&'static str),
    /// Capture 1 is the hostname; there is no address.
    HostOnly,
}

/// One `(pattern, extractor)` pair in a cascade.
pub(crate) struct ExtractionRule {
    pub(crate) name: RuleName,
    pattern: Regex,
    extract: Extract,
}

impl ExtractionRule {
    fn new(name: RuleName, pattern: &str, extract: Extract) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("hardcoded rule pattern"),
            extract,
        }
    }

    /// Applies the rule to a residual segment, returning `(hostname, ip)`.
    pub(crate) fn apply(&self, residual: &str) -> Option<(String, String)> {
        let caps = self.pattern.captures(residual)?;
        Some(match self.extract {
            Extract::HostAndIp => (caps[1].to_string(), caps[2].to_string()),
            Extract::IpAsHostname => (caps[1].to_string(), caps[1].to_string()),
            Extract::LabeledIp(label) => (label.to_string(), caps[1].to_string()),
            Extract::HostOnly => (caps[1].to_string(), UNKNOWN.to_string()),
        })
    }
}

static WINDOWS_RULES: Lazy<Vec<ExtractionRule>> = Lazy::new(|| {
    use Extract::*;
    use RuleName::*;
    vec![
        ExtractionRule::new(HostBracketedV6, &format!(r"({HOST})\s+\[({V6})\]"), HostAndIp),
        ExtractionRule::new(BracketedV6, &format!(r"\[({V6})\]"), LabeledIp(IPV6_LABEL)),
        ExtractionRule::new(
            StarHostBracketedAddr,
            &format!(r"\*\s+({HOST})\s+\[({ADDR})\]"),
            HostAndIp,
        ),
        ExtractionRule::new(StarAddr, &format!(r"\*\s+({ADDR})"), LabeledIp("*")),
        ExtractionRule::new(HostBracketedV4, &format!(r"({HOST})\s+\[([\d\.]+)\]"), HostAndIp),
        ExtractionRule::new(BracketedV4, r"\[([\d\.]+)\]", IpAsHostname),
        ExtractionRule::new(HostParenV4, &format!(r"({HOST})\s+\(([\d\.]+)\)"), HostAndIp),
        ExtractionRule::new(HostParenV6, &format!(r"({HOST})\s+\(({V6})\)"), HostAndIp),
        // tracert prints the address last, so bare addresses must sit at a
        // whitespace/end boundary.
        ExtractionRule::new(BareV4, &format!(r"({V4})(?:\s|$)"), IpAsHostname),
        ExtractionRule::new(BareV6, &format!(r"({V6})(?:\s|$)"), LabeledIp(IPV6_LABEL)),
        ExtractionRule::new(TrailingHost, &format!(r"({HOST})$"), HostOnly),
    ]
});

static UNIX_RULES: Lazy<Vec<ExtractionRule>> = Lazy::new(|| {
    use Extract::*;
    use RuleName::*;
    vec![
        ExtractionRule::new(HostBracketedV6, &format!(r"({HOST})\s+\[({V6})\]"), HostAndIp),
        ExtractionRule::new(BracketedV6, &format!(r"\[({V6})\]"), LabeledIp(IPV6_LABEL)),
        ExtractionRule::new(
            StarHostBracketedAddr,
            &format!(r"\*\s+({HOST})\s+\[({ADDR})\]"),
            HostAndIp,
        ),
        ExtractionRule::new(StarAddr, &format!(r"\*\s+({ADDR})"), LabeledIp("*")),
        ExtractionRule::new(HostParenV4, &format!(r"({HOST})\s+\(([\d\.]+)\)"), HostAndIp),
        ExtractionRule::new(HostParenV6, &format!(r"({HOST})\s+\(({V6})\)"), HostAndIp),
        ExtractionRule::new(ParenV4, r"\(([\d\.]+)\)", IpAsHostname),
        ExtractionRule::new(ParenV6, &format!(r"\(({V6})\)"), LabeledIp(IPV6_LABEL)),
        ExtractionRule::new(HostBracketedV4, &format!(r"({HOST})\s+\[([\d\.]+)\]"), HostAndIp),
        ExtractionRule::new(BareV4, &format!(r"({V4})"), IpAsHostname),
        ExtractionRule::new(BareV6, &format!(r"({V6})(?:\s|$)"), LabeledIp(IPV6_LABEL)),
        ExtractionRule::new(TrailingHost, &format!(r"({HOST})$"), HostOnly),
        ExtractionRule::new(ResidualV6, &format!(r"({V6})"), LabeledIp(IPV6_LABEL)),
    ]
});

pub(crate) fn rules_for(dialect: Dialect) -> &'static [ExtractionRule] {
    match dialect {
        Dialect::Windows => &WINDOWS_RULES,
        Dialect::Unix => &UNIX_RULES,
    }
}

static NUMERIC_HOSTNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("hardcoded pattern"));
static ANY_V4_RE: Lazy<Regex> = Lazy::new(|| Regex::new(V4).expect("hardcoded pattern"));
static ANY_V6_RE: Lazy<Regex> = Lazy::new(|| Regex::new(V6).expect("hardcoded pattern"));

/// Resolves the residual address segment of one hop line.
///
/// Runs the dialect's cascade over `residual`, falls back to the residual
/// itself as a hostname, applies the hostname sanity check, and as a last
/// resort re-scans `raw_line` for any address before settling on
/// `"Unknown"`/`"*"`.
pub(crate) fn resolve_endpoint(
    hop: u32,
    residual: &str,
    raw_line: &str,
    dialect: Dialect,
    sink: &dyn ParseSink,
) -> (String, String) {
    let mut hostname = UNKNOWN.to_string();
    let mut ip = UNKNOWN.to_string();

    let mut matched = false;
    for rule in rules_for(dialect) {
        if let Some((h, i)) = rule.apply(residual) {
            sink.record(ParseEvent::RuleMatched {
                hop,
                rule: rule.name,
                hostname: &h,
                ip: &i,
            });
            hostname = h;
            ip = i;
            matched = true;
            break;
        }
    }

    if !matched && !residual.is_empty() && residual != "*" {
        sink.record(ParseEvent::ResidualFallback { hop, residual });
        hostname = residual.to_string();
    }

    // Purely numeric or very short names are almost always stripping
    // artifacts, not hostnames. Heuristic: legitimately short names lose.
    if NUMERIC_HOSTNAME_RE.is_match(&hostname) || hostname.len() <= 2 {
        sink.record(ParseEvent::HostnameRejected {
            hop,
            rejected: &hostname,
        });
        hostname = UNKNOWN.to_string();
    }

    // The address should always be present in the tool output. Before
    // settling on "Unknown", retry against the whole raw line.
    if ip == UNKNOWN {
        if let Some(m) = ANY_V4_RE.find(raw_line) {
            ip = m.as_str().to_string();
            sink.record(ParseEvent::IpRecovered { hop, ip: &ip });
        } else if let Some(m) = ANY_V6_RE.find(raw_line) {
            ip = m.as_str().to_string();
            sink.record(ParseEvent::IpRecovered { hop, ip: &ip });
        } else if raw_line.contains('*') {
            ip = "*".to_string();
        }
    }

    (hostname, ip)
}
