//! Session and two-factor challenge values

use std::fmt;
use std::hash::{Hash, Hasher};

use serde_json::Value;
use venmo_domain::DeviceIdentity;

/// An authenticated session.
///
/// Only produced by a successful login or two-factor verification. The value
/// is immutable and never expires on its own; once the token is revoked or
/// expires remotely, calls made with it come back as authentication errors.
///
/// Equality and hashing consider the access token only.
#[derive(Clone)]
pub struct Session {
    access_token: String,
    device_id: String,
    client_id: String,
    user: Option<Value>,
}

impl Session {
    pub(crate) fn new(access_token: String, device: &DeviceIdentity, user: Option<Value>) -> Self {
        Self {
            access_token,
            device_id: device.device_id().to_string(),
            client_id: device.client_id().to_string(),
            user,
        }
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// `user` object returned alongside the token, if the service sent one.
    #[must_use]
    pub const fn user(&self) -> Option<&Value> {
        self.user.as_ref()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.access_token == other.access_token
    }
}

impl Eq for Session {}

impl Hash for Session {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.access_token.hash(state);
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("device_id", &self.device_id)
            .field("client_id", &self.client_id)
            .field("user", &self.user.is_some())
            .finish()
    }
}

/// Two-factor challenge issued by a primary login.
///
/// Holds the server's opaque secret and the device identity the login used.
/// Valid for that login attempt only. Sending the SMS before verifying, and
/// not reusing a challenge across attempts, is up to the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct TwoFactorChallenge {
    otp_secret: String,
    device: DeviceIdentity,
}

impl TwoFactorChallenge {
    pub(crate) fn new(otp_secret: String, device: DeviceIdentity) -> Self {
        Self { otp_secret, device }
    }

    #[must_use]
    pub fn otp_secret(&self) -> &str {
        &self.otp_secret
    }

    #[must_use]
    pub const fn device(&self) -> &DeviceIdentity {
        &self.device
    }
}

impl fmt::Debug for TwoFactorChallenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwoFactorChallenge")
            .field("otp_secret", &"[REDACTED]")
            .field("device", &self.device)
            .finish()
    }
}

/// Result of the primary login step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The service issued a token straight away
    DirectSuccess(Session),
    /// An OTP must be sent and verified before a token is issued
    TwoFactorRequired(TwoFactorChallenge),
}

impl LoginOutcome {
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::DirectSuccess(session) => Some(session),
            Self::TwoFactorRequired(_) => None,
        }
    }

    #[must_use]
    pub const fn challenge(&self) -> Option<&TwoFactorChallenge> {
        match self {
            Self::DirectSuccess(_) => None,
            Self::TwoFactorRequired(challenge) => Some(challenge),
        }
    }

    #[must_use]
    pub const fn requires_two_factor(&self) -> bool {
        matches!(self, Self::TwoFactorRequired(_))
    }
}
