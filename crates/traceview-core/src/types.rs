//! Core types for trace execution and parsing.

use serde::{Deserialize, Serialize};

/// Output format convention of the OS route-tracing tool.
///
/// The dialect is always supplied explicitly by the caller; the parsing
/// engine never inspects the environment, so output captured on one OS can
/// be parsed on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `tracert` output (`  1    <1 ms ...  router.local [192.168.1.1]`).
    Windows,
    /// `traceroute` output (` 1  router.local (192.168.1.1)  0.123 ms ...`).
    Unix,
}

impl Dialect {
    /// Returns the dialect of the tool installed on the host OS.
    pub fn native() -> Self {
        if cfg!(target_os = "windows") {
            Dialect::Windows
        } else {
            Dialect::Unix
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Windows => write!(f, "windows"),
            Dialect::Unix => write!(f, "unix"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = crate::TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(Dialect::Windows),
            "unix" => Ok(Dialect::Unix),
            _ => Err(crate::TraceError::UnknownDialect(s.to_string())),
        }
    }
}

/// Options forwarded to the route-tracing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceOptions {
    /// Maximum number of hops to probe (1..=64).
    pub max_hops: u32,
    /// Per-probe timeout in seconds (1..=30).
    pub timeout: u32,
    /// Number of probes per hop (1..=10). Ignored by `tracert`.
    pub queries: u32,
}

impl TraceOptions {
    /// Allowed range for `max_hops`.
    pub const MAX_HOPS_RANGE: (u32, u32) = (1, 64);
    /// Allowed range for `timeout` (seconds).
    pub const TIMEOUT_RANGE: (u32, u32) = (1, 30);
    /// Allowed range for `queries`.
    pub const QUERIES_RANGE: (u32, u32) = (1, 10);

    /// Validates the options against their allowed ranges.
    pub fn validate(&self) -> Result<(), crate::TraceError> {
        Self::check("max_hops", self.max_hops, Self::MAX_HOPS_RANGE)?;
        Self::check("timeout", self.timeout, Self::TIMEOUT_RANGE)?;
        Self::check("queries", self.queries, Self::QUERIES_RANGE)?;
        Ok(())
    }

    fn check(option: &'static str, value: u32, (min, max): (u32, u32)) -> Result<(), crate::TraceError> {
        if value < min || value > max {
            return Err(crate::TraceError::InvalidOption {
                option,
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            max_hops: 30,
            timeout: 5,
            queries: 3,
        }
    }
}
