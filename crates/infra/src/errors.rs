//! Conversions from infrastructure library errors
//!
//! reqwest errors are foreign to both this crate and `venmo-core`, so they
//! are routed through the [`InfraError`] newtype.

use reqwest::Error as HttpError;
use venmo_core::TransportError;
use venmo_domain::ConfigError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the port error.
#[derive(Debug)]
pub struct InfraError(pub TransportError);

impl From<InfraError> for TransportError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        if err.is_timeout() {
            return Self(TransportError::Timeout(err.to_string()));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if err.is_connect() {
            return Self(TransportError::Connect(err.to_string()));
        }

        Self(TransportError::Request(err.to_string()))
    }
}

/// A reqwest client that fails to build is a configuration problem.
pub(crate) fn builder_error(err: &HttpError) -> ConfigError {
    ConfigError::Invalid(format!("failed to build HTTP client: {err}"))
}
