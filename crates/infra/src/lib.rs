//! # Venmo Infrastructure
//!
//! Infrastructure implementations of the `venmo-core` ports.
//!
//! This crate contains:
//! - The reqwest-backed [`http::HttpClient`] transport
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Implements traits defined in `venmo-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod config;
pub mod errors;
pub mod http;

use std::sync::Arc;

use tracing::info;
use venmo_core::VenmoClient;
use venmo_domain::{ClientConfig, ConfigError};

// Re-export commonly used items
pub use http::{HttpClient, HttpClientBuilder};

/// Build a [`VenmoClient`] talking to the real service over HTTP.
///
/// # Errors
/// Returns `ConfigError::Invalid` if the configuration does not validate or
/// the HTTP client cannot be constructed.
///
/// # Example
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = venmo_infra::connect(venmo_infra::config::load()?)?;
/// let device = client.device_identity("my-device-id");
/// # Ok(())
/// # }
/// ```
pub fn connect(config: ClientConfig) -> Result<VenmoClient, ConfigError> {
    config.validate()?;
    let http = HttpClient::from_config(&config)?;
    let client = VenmoClient::new(config, Arc::new(http))?;
    info!(base_url = %client.endpoints().base(), "venmo client ready");
    Ok(client)
}
