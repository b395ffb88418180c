//! Shared test helpers for `venmo-core` integration tests.
//!
//! Provides a scripted in-memory transport so tests can assert on exactly
//! which requests were sent, and how many.

#![allow(dead_code)]

pub mod transport;

use std::sync::Arc;

use venmo_core::VenmoClient;
use venmo_domain::{ClientConfig, DeviceIdentity};

pub use transport::ScriptedTransport;

pub const BASE_URL: &str = "https://api.venmo.test/v1";

/// Client wired to `transport` with the test base URL.
pub fn client_with(transport: &Arc<ScriptedTransport>) -> VenmoClient {
    init_tracing();
    VenmoClient::new(ClientConfig::with_base_url(BASE_URL), transport.clone())
        .expect("test client should build")
}

pub fn device() -> DeviceIdentity {
    DeviceIdentity::new("device-123", "1")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("debug").try_init();
}
