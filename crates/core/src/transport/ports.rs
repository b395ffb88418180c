//! Port interfaces for issuing HTTP requests
//!
//! These types define the boundary between the protocol logic in this crate
//! and the HTTP stack that actually talks to the service.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use url::Url;
use venmo_domain::constants::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use venmo_domain::impl_wire_str_conversions;

/// HTTP methods used by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl_wire_str_conversions!(HttpMethod {
    Get => "GET",
    Post => "POST",
    Delete => "DELETE",
});

/// A single outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRequest {
    pub method: HttpMethod,
    pub url: Url,
    /// Header pairs in insertion order, names as sent on the wire
    pub headers: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl RawRequest {
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self { method, url, headers: Vec::new(), body: None }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer(self, access_token: &str) -> Self {
        self.header(HEADER_AUTHORIZATION, format!("Bearer {access_token}"))
    }

    /// Attach a JSON body and its `Content-Type`.
    #[must_use]
    pub fn json(self, body: Value) -> Self {
        let mut request = self.header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);
        request.body = Some(body);
        request
    }

    /// First value of the named header (case-insensitive).
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response exactly as the transport received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Status text (e.g. "Too Many Requests"); may be empty
    pub reason: String,
    /// Header pairs as received; names may repeat
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16) -> Self {
        Self { status, reason: String::new(), headers: Vec::new(), body: Vec::new() }
    }

    /// Response with a serialized JSON body.
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
            .with_body(body.to_string())
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// 2xx status
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level failures (no response was received)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Issues one HTTP request and returns the raw response.
///
/// Implementations must not retry and must not interpret the response; any
/// status code is a successful transport outcome.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and wait for the complete response.
    async fn execute(&self, request: RawRequest) -> Result<RawResponse, TransportError>;
}
