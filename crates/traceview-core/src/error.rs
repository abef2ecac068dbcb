//! Error types for trace operations.

use thiserror::Error;

/// Main error type for trace operations.
#[derive(Error, Debug)]
pub enum TraceError {
    // Input errors
    #[error("Host cannot be empty")]
    EmptyHost,

    #[error("Invalid {option}: {value} (allowed {min}..={max})")]
    InvalidOption {
        option: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    // Execution errors
    #[error("Failed to execute {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Traceroute command failed with code {code}: {detail}")]
    CommandFailed { code: i32, detail: String },

    #[error("Traceroute command produced no output")]
    NoOutput,

    #[error("Traceroute command exceeded the {0}s wall-clock ceiling")]
    DeadlineExceeded(u64),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TraceError {
    /// Returns true if this error was caused by invalid caller input rather
    /// than a failure of the external tool.
    ///
    /// The HTTP layer maps invalid-input errors to request-validation status
    /// codes and everything else to execution-failure codes.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyHost | Self::InvalidOption { .. } | Self::UnknownDialect(_)
        )
    }
}

impl From<std::io::Error> for TraceError {
    fn from(err: std::io::Error) -> Self {
        TraceError::Internal(err.to_string())
    }
}
