//! HTTP request handlers.

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use traceview_core::{TraceOptions, TraceResult};

/// Request body for the trace endpoint.
#[derive(Debug, Deserialize)]
pub struct TraceRequest {
    /// Target hostname or IP address.
    pub host: String,
    /// Optional display name for the trace.
    #[serde(default)]
    pub name: Option<String>,
    /// Maximum number of hops (1-64).
    #[serde(default = "default_max_hops")]
    pub max_hops: u32,
    /// Per-probe timeout in seconds (1-30).
    #[serde(default = "default_timeout")]
    pub timeout: u32,
    /// Probes per hop (1-10).
    #[serde(default = "default_queries")]
    pub queries: u32,
}

fn default_max_hops() -> u32 {
    TraceOptions::default().max_hops
}

fn default_timeout() -> u32 {
    TraceOptions::default().timeout
}

fn default_queries() -> u32 {
    TraceOptions::default().queries
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Creates the Axum router with all endpoints.
pub fn create_router() -> Router {
    Router::new()
        .route("/trace", post(handle_trace))
        .route("/health", get(handle_health))
}

/// Health check endpoint.
async fn handle_health() -> &'static str {
    "ok"
}

/// Handles the POST /trace endpoint.
async fn handle_trace(
    Json(request): Json<TraceRequest>,
) -> Result<Json<TraceResult>, (StatusCode, Json<ErrorResponse>)> {
    let options = TraceOptions {
        max_hops: request.max_hops,
        timeout: request.timeout,
        queries: request.queries,
    };

    match traceview_exec::run_trace(&request.host, request.name.as_deref(), &options).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            let status = if e.is_invalid_input() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Err((
                status,
                Json(ErrorResponse {
                    error: format!("Trace failed: {}", e),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_max_hops(), 30);
        assert_eq!(default_timeout(), 5);
        assert_eq!(default_queries(), 3);
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: TraceRequest = serde_json::from_str(r#"{"host":"example.com"}"#).unwrap();
        assert_eq!(request.host, "example.com");
        assert_eq!(request.name, None);
        assert_eq!(request.max_hops, 30);
        assert_eq!(request.timeout, 5);
        assert_eq!(request.queries, 3);
    }

    #[test]
    fn test_request_accepts_full_body() {
        let request: TraceRequest = serde_json::from_str(
            r#"{"host":"example.com","name":"edge probe","max_hops":20,"timeout":3,"queries":2}"#,
        )
        .unwrap();
        assert_eq!(request.name.as_deref(), Some("edge probe"));
        assert_eq!(request.max_hops, 20);
        assert_eq!(request.timeout, 3);
        assert_eq!(request.queries, 2);
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse {
            error: "Trace failed: host must not be empty".to_string(),
        })
        .unwrap();
        assert_eq!(body["error"], "Trace failed: host must not be empty");
    }
}
