//! Error types and the uniform result shape
//!
//! Every public operation of the client resolves to an [`ApiResult`]: either
//! an [`ApiResponse`] carrying the decoded body, or an [`ApiError`] whose
//! [`ApiErrorKind`] is one of a closed set of categories. Both sides carry the
//! normalized response headers (empty when no request was made).

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Response headers keyed by their normalized name (see
/// [`normalize_header_key`]).
pub type Headers = BTreeMap<String, String>;

/// Result type alias for client operations
pub type ApiResult<T> = std::result::Result<ApiResponse<T>, ApiError>;

/// Canonical form of a header name: lower-case, hyphens replaced by
/// underscores.
///
/// ```
/// use venmo_domain::normalize_header_key;
///
/// assert_eq!(normalize_header_key("Venmo-Otp-Secret"), "venmo_otp_secret");
/// ```
#[must_use]
pub fn normalize_header_key(name: &str) -> String {
    name.to_ascii_lowercase().replace('-', "_")
}

/// Successful outcome of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Decoded response body
    pub data: T,
    /// Normalized response headers
    pub headers: Headers,
}

impl<T> ApiResponse<T> {
    /// Wrap decoded data together with its headers.
    pub const fn new(data: T, headers: Headers) -> Self {
        Self { data, headers }
    }

    /// Look up a response header by either its wire or normalized name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&normalize_header_key(name)).map(String::as_str)
    }

    /// Transform the payload while keeping the headers.
    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse { data: f(self.data), headers: self.headers }
    }
}

/// Categories of client failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Missing or invalid caller input, detected before any network call
    Validation,
    /// HTTP 429 from the service
    RateLimited,
    /// Response body could not be decoded
    MalformedResponse,
    /// Connectivity failure, timeout or other transport fault
    Transport,
    /// The service rejected the credentials, OTP or token
    Authentication {
        /// Error code from the decoded error body, when present
        code: Option<i64>,
    },
    /// Payment amount outside the request bounds (506/507)
    DomainValidation {
        /// Local rule code
        code: u16,
    },
}

impl ApiErrorKind {
    /// Stable label for structured logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::RateLimited => "rate_limited",
            Self::MalformedResponse => "malformed_response",
            Self::Transport => "transport",
            Self::Authentication { .. } => "authentication",
            Self::DomainValidation { .. } => "domain_validation",
        }
    }

    /// Whether repeating the same call later could succeed.
    ///
    /// Only classifies; the client never retries on its own.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Transport)
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "Validation error"),
            Self::RateLimited => write!(f, "Rate limit has been hit"),
            Self::MalformedResponse => write!(f, "Malformed response"),
            Self::Transport => write!(f, "Transport error"),
            Self::Authentication { code: Some(code) } => {
                write!(f, "Authentication error ({code})")
            }
            Self::Authentication { code: None } => write!(f, "Authentication error"),
            Self::DomainValidation { code } => write!(f, "Domain validation error ({code})"),
        }
    }
}

/// Failed outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    #[serde(default)]
    headers: Headers,
}

impl ApiError {
    /// Build an error of the given kind without headers.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), headers: Headers::new() }
    }

    /// Local input validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    /// Transport fault with a diagnostic message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    /// Service rejection of credentials, OTP or token.
    pub fn authentication(code: Option<i64>, message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Authentication { code }, message)
    }

    /// Payment amount rule violation.
    pub fn domain_validation(code: u16, message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::DomainValidation { code }, message)
    }

    /// Attach the normalized headers of the response that caused the error.
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Error category
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Human readable diagnostic
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Normalized headers of the failed response, empty for local failures
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Numeric code: 506/507 for amount rules, the service code for
    /// authentication failures.
    #[must_use]
    pub fn code(&self) -> Option<i64> {
        match self.kind {
            ApiErrorKind::DomainValidation { code } => Some(i64::from(code)),
            ApiErrorKind::Authentication { code } => code,
            _ => None,
        }
    }

    /// See [`ApiErrorKind::is_retryable`].
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// See [`ApiErrorKind::label`].
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Errors raised while building the client or loading its configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
