//! Request-scoped tracing hooks for the HTTP trace layer.

use std::time::Duration;

use axum::{body::Body, http::Request, response::Response};
use tracing::Span;
use uuid::Uuid;

/// Open one span per request, tagged with a fresh request id so every
/// log line of a request can be correlated.
pub fn make_span_with_request_id(request: &Request<Body>) -> Span {
    let request_id = Uuid::new_v4();
    tracing::span!(
        tracing::Level::INFO,
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    )
}

pub fn on_request(_request: &Request<Body>, _span: &Span) {
    tracing::info!("started processing request");
}

pub fn on_response(response: &Response, latency: Duration, _span: &Span) {
    tracing::info!(
        status = %response.status(),
        latency_ms = latency.as_millis() as u64,
        "finished processing request"
    );
}
