//! Caller-supplied inputs to the client

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::impl_wire_str_conversions;

/// Login credentials for the primary credential exchange.
///
/// Transient: consumed by a single login attempt and never stored by the
/// client. `Debug` output never contains the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    identifier: String,
    password: String,
}

impl Credentials {
    /// `identifier` is a username, email address or phone number.
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), password: password.into() }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Identity of the requesting installation.
///
/// Must stay identical across every step of one login attempt (primary login,
/// SMS dispatch, two-factor verification).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceIdentity {
    device_id: String,
    client_id: String,
}

impl DeviceIdentity {
    pub fn new(device_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self { device_id: device_id.into(), client_id: client_id.into() }
    }

    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

/// Visibility of a payment request in the service's feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    Private,
    Public,
    Friends,
}

impl_wire_str_conversions!(Audience {
    Private => "private",
    Public => "public",
    Friends => "friends",
});

impl Audience {
    /// Boolean privacy switch: `true` is private, `false` is public.
    #[must_use]
    pub const fn from_private_flag(is_private: bool) -> Self {
        if is_private {
            Self::Private
        } else {
            Self::Public
        }
    }
}

/// A request *for* money from another user.
///
/// `amount` is negative: asking for 20 is `-20.0`. Bounds are enforced by the
/// client before anything is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: f64,
    pub target_user: String,
    pub note: String,
    pub audience: Audience,
}

impl PaymentRequest {
    /// Private request for `|amount|` from `target_user`.
    pub fn new(amount: f64, target_user: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            amount,
            target_user: target_user.into(),
            note: note.into(),
            audience: Audience::default(),
        }
    }

    #[must_use]
    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = audience;
        self
    }

    /// Apply the boolean privacy switch (see [`Audience::from_private_flag`]).
    #[must_use]
    pub fn private(self, is_private: bool) -> Self {
        self.with_audience(Audience::from_private_flag(is_private))
    }
}

/// Pagination window for friend lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendsPage {
    pub limit: u32,
    pub offset: u32,
}

impl Default for FriendsPage {
    fn default() -> Self {
        Self { limit: 1000, offset: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("alice@example.com", "hunter2");
        let rendered = format!("{creds:?}");

        assert!(rendered.contains("alice@example.com"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn private_flag_maps_to_audience() {
        assert_eq!(Audience::from_private_flag(true), Audience::Private);
        assert_eq!(Audience::from_private_flag(false), Audience::Public);
        assert_eq!(Audience::from_private_flag(false), Audience::from_private_flag(false));
    }

    #[test]
    fn payment_request_defaults_to_private() {
        let request = PaymentRequest::new(-20.0, "bob", "dinner");
        assert_eq!(request.audience, Audience::Private);
        assert_eq!(request.private(false).audience, Audience::Public);
    }

    #[test]
    fn audience_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Audience::Public).unwrap(), "public");
        assert_eq!(Audience::Friends.as_str(), "friends");
        assert_eq!("PRIVATE".parse::<Audience>().unwrap(), Audience::Private);
    }
}
