//! Wire-level constants
//!
//! Centralized location for the endpoints, header names and limits the client
//! shares across crates.

// Service defaults
pub const DEFAULT_BASE_URL: &str = "https://api.venmo.com/v1";
pub const DEFAULT_CLIENT_ID: &str = "1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Endpoint paths (relative to the base URL)
pub const PATH_ACCESS_TOKEN: &str = "oauth/access_token";
pub const PATH_TWO_FACTOR_TOKEN: &str = "account/two-factor/token";
pub const PATH_STORIES: &str = "stories";
pub const PATH_USERS: &str = "users";
pub const PATH_FRIENDS: &str = "friends";
pub const PATH_PAYMENTS: &str = "payments";

// Request headers
pub const HEADER_DEVICE_ID: &str = "device-id";
pub const HEADER_OTP: &str = "venmo-otp";
pub const HEADER_OTP_SECRET: &str = "venmo-otp-secret";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Normalized (underscore) form of [`HEADER_OTP_SECRET`] as it appears in
/// response headers after normalization.
pub const RESPONSE_HEADER_OTP_SECRET: &str = "venmo_otp_secret";

/// Channel requested when asking the service to text a one-time password.
pub const SMS_CHANNEL: &str = "sms";

// Payment request rules
pub const REQUEST_PAYMENT_FLOOR: f64 = -100.0;
pub const CODE_AMOUNT_NOT_NEGATIVE: u16 = 506;
pub const CODE_AMOUNT_BELOW_FLOOR: u16 = 507;

// Fixed diagnostic messages
pub const MSG_MALFORMED_RESPONSE: &str = "Error occurred when fetching data";
pub const MSG_RATE_LIMITED_FALLBACK: &str = "Too Many Requests";
