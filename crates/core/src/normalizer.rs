//! Response normalization
//!
//! Turns a [`RawResponse`] into the uniform [`ApiResult`] shape. HTTP 429 is
//! the only status handled before the body is looked at; every other status
//! is decoded and returned as data, error bodies included.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use venmo_domain::constants::{MSG_MALFORMED_RESPONSE, MSG_RATE_LIMITED_FALLBACK};
use venmo_domain::{normalize_header_key, ApiError, ApiErrorKind, ApiResponse, ApiResult, Headers};

use crate::transport::RawResponse;

pub(crate) const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Fold raw header pairs into normalized keys.
///
/// Repeated names are joined with `", "` in the order received.
#[must_use]
pub fn normalize_headers(pairs: &[(String, String)]) -> Headers {
    let mut headers = Headers::new();
    for (name, value) in pairs {
        headers
            .entry(normalize_header_key(name))
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.clone());
    }
    headers
}

/// Normalize a raw response, decoding the body as JSON into `T`.
///
/// # Errors
/// - `RateLimited` for status 429; the body is not parsed
/// - `MalformedResponse` when the body does not decode into `T`
pub fn normalize<T: DeserializeOwned>(response: RawResponse) -> ApiResult<T> {
    let RawResponse { status, reason, headers, body } = response;
    let headers = normalize_headers(&headers);

    if status == STATUS_TOO_MANY_REQUESTS {
        let message =
            if reason.trim().is_empty() { MSG_RATE_LIMITED_FALLBACK.to_string() } else { reason };
        warn!(status, "rate limit has been hit");
        return Err(ApiError::new(ApiErrorKind::RateLimited, message).with_headers(headers));
    }

    match serde_json::from_slice::<T>(&body) {
        Ok(data) => Ok(ApiResponse::new(data, headers)),
        Err(err) => {
            debug!(status, error = %err, body_len = body.len(), "response body failed to decode");
            Err(ApiError::new(ApiErrorKind::MalformedResponse, MSG_MALFORMED_RESPONSE)
                .with_headers(headers))
        }
    }
}
