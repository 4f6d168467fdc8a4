//! Custom tracing hooks for the HTTP `TraceLayer`
//!
//! Each request gets its own span; request and response events are logged at a
//! level derived from the status class, with credential-bearing headers redacted.

use axum::http::{HeaderMap, Request, Response};
use std::collections::HashMap;
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tracing::{info_span, Span};

const REDACTED: &str = "[REDACTED]";

fn is_sensitive_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.contains("authorization") || name.contains("cookie") || name.contains("token")
}

fn loggable_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            if is_sensitive_header(name.as_str()) {
                Some((name.to_string(), REDACTED.to_string()))
            } else {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}

pub fn make_custom_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri().path(),
        query = ?request.uri().query(),
        request_id = request_id,
        user_agent = ?request.headers().get("user-agent"),
        content_length = ?request.headers().get("content-length"),
    )
}

pub fn on_custom_request<B>(request: &Request<B>, _span: &Span) {
    tracing::info!(
        method = %request.method(),
        uri = %request.uri(),
        headers = ?loggable_headers(request.headers()),
        "Incoming HTTP request"
    );
}

pub fn on_custom_response<B>(response: &Response<B>, latency: Duration, _span: &Span) {
    let status = response.status();
    let latency_ms = latency.as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(status = %status, latency_ms = latency_ms, "HTTP request completed with server error");
    } else if status.is_client_error() {
        tracing::warn!(status = %status, latency_ms = latency_ms, "HTTP request completed with client error");
    } else {
        tracing::info!(status = %status, latency_ms = latency_ms, "HTTP request completed successfully");
    }
}

pub fn on_custom_failure(error: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    let error_type = match &error {
        ServerErrorsFailureClass::StatusCode(code) => format!("HTTP {}", code.as_u16()),
        ServerErrorsFailureClass::Error(_) => "Internal Error".to_string(),
    };

    tracing::error!(
        error = ?error,
        latency_ms = latency.as_millis() as u64,
        error_type = %error_type,
        "HTTP request failed"
    );
}
