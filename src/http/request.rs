//! Inbound request handling.
//!
//! # Responsibilities
//! - Generate a request ID (UUID v4) for tracing
//! - Read the envelope body according to its declared Content-Length
//!
//! # Design Decisions
//! - Request ID added as early as possible, by the outermost layer
//! - An inbound request without a positive Content-Length carries no
//!   parameters: its body is taken to be `{}` and never read

use axum::{
    body::{Body, Bytes},
    http::{header::CONTENT_LENGTH, HeaderMap, HeaderValue, Request},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

use crate::relay::envelope::EMPTY_ENVELOPE;
use crate::relay::RelayError;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a fresh UUID v4 for requests that arrive without an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID stamped by the request ID layer.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Span for one inbound request.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id(request.headers()),
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Declared body length, if the header is present and numeric.
pub fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Read the envelope bytes, substituting `{}` when no length is declared.
pub async fn read_envelope(request: Request<Body>, limit: usize) -> Result<Bytes, RelayError> {
    match declared_length(request.headers()) {
        Some(len) if len > 0 => axum::body::to_bytes(request.into_body(), limit)
            .await
            .map_err(|e| RelayError::Body(e.to_string())),
        _ => Ok(Bytes::from_static(EMPTY_ENVELOPE)),
    }
}
