//! Core types, errors, and result model for traceview.
//!
//! This crate provides the fundamental abstractions shared by the parsing
//! engine, the orchestrator, and the HTTP layer:
//!
//! - [`Dialect`] selecting the OS output format of the route-tracing tool
//! - [`TraceOptions`] for validated trace options
//! - [`TraceError`] for error handling
//! - [`Hop`] and [`TraceResult`] as the normalized output model

pub mod error;
pub mod result;
pub mod types;

pub use error::TraceError;
pub use result::{Hop, TraceResult};
pub use types::{Dialect, TraceOptions};
