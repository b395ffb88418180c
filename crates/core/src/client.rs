//! Venmo API client
//!
//! [`VenmoClient`] is an explicit, stateless value: it holds configuration and
//! a transport, never a token. Sessions are returned to the caller and passed
//! back in, so any number of accounts can share one client.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use venmo_domain::{ApiError, ApiResult, ClientConfig, ConfigError, DeviceIdentity};

use crate::endpoints::Endpoints;
use crate::normalizer::normalize;
use crate::transport::{RawRequest, RawResponse, Transport};

/// Client for the Venmo private API
#[derive(Clone)]
pub struct VenmoClient {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
    config: ClientConfig,
}

impl VenmoClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration
    /// * `transport` - HTTP transport every request is sent through
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the configuration does not validate
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
        let base = config.validate()?;
        let endpoints = Endpoints::new(base)?;

        Ok(Self { transport, endpoints, config })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> VenmoClientBuilder {
        VenmoClientBuilder::default()
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Device identity using the configured default client id.
    pub fn device_identity(&self, device_id: impl Into<String>) -> DeviceIdentity {
        DeviceIdentity::new(device_id, self.config.default_client_id.clone())
    }

    /// Send one request, converting transport faults into `Transport` errors.
    ///
    /// `context` prefixes the diagnostic message of a transport failure.
    pub(crate) async fn dispatch(
        &self,
        request: RawRequest,
        context: &str,
    ) -> Result<RawResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        debug!(%method, %url, "sending request");

        match self.transport.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = response.status, "received response");
                Ok(response)
            }
            Err(err) => {
                warn!(%method, %url, error = %err, "transport failure");
                Err(ApiError::transport(format!("{context}: {err}")))
            }
        }
    }

    /// Send one request and normalize the response.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        request: RawRequest,
        context: &str,
    ) -> ApiResult<T> {
        let response = self.dispatch(request, context).await?;
        normalize(response)
    }
}

impl fmt::Debug for VenmoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VenmoClient")
            .field("base_url", &self.endpoints.base().as_str())
            .field("default_client_id", &self.config.default_client_id)
            .finish_non_exhaustive()
    }
}

/// Builder for [`VenmoClient`]
#[derive(Default)]
pub struct VenmoClientBuilder {
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
}

impl VenmoClientBuilder {
    /// Set the client configuration
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the transport
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns error if the transport is missing or the configuration is
    /// invalid
    pub fn build(self) -> Result<VenmoClient, ConfigError> {
        let config = self.config.unwrap_or_default();
        let transport =
            self.transport.ok_or_else(|| ConfigError::Missing("transport not set".to_string()))?;

        VenmoClient::new(config, transport)
    }
}

impl fmt::Debug for VenmoClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VenmoClientBuilder")
            .field("config", &self.config)
            .field("transport", &self.transport.is_some())
            .finish()
    }
}
