//! Interpretation of `/oauth/access_token` response bodies

use serde_json::Value;
use venmo_domain::{ApiError, DeviceIdentity};

use super::session::Session;

/// Build a session from a decoded token grant, if it carries a token.
pub(super) fn session_from_grant(data: &Value, device: &DeviceIdentity) -> Option<Session> {
    let token = data.get("access_token")?.as_str()?.trim();
    if token.is_empty() {
        return None;
    }
    let user = data.get("user").filter(|user| !user.is_null()).cloned();
    Some(Session::new(token.to_string(), device, user))
}

/// Turn a decoded body without a token into an authentication error.
///
/// The service reports failures as `{"error": {"message": .., "code": ..}}`;
/// a bare `{"error": "..."}` string is accepted as well. `fallback` is used
/// when the body carries no message.
pub(super) fn rejection(data: &Value, fallback: &str) -> ApiError {
    let error = data.get("error");
    let code = error.and_then(|e| e.get("code")).and_then(code_as_i64);
    let message = error
        .and_then(|e| e.get("message").and_then(Value::as_str).or_else(|| e.as_str()))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(fallback);

    ApiError::authentication(code, message)
}

fn code_as_i64(code: &Value) -> Option<i64> {
    code.as_i64().or_else(|| code.as_str().and_then(|s| s.parse().ok()))
}
