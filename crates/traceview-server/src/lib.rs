//! HTTP REST API server for traceview.

mod handlers;

pub use handlers::create_router;

/// Default server port.
pub const DEFAULT_PORT: u16 = 3765;
