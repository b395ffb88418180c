//! # Venmo Core
//!
//! Protocol logic for the Venmo private API - no HTTP stack.
//!
//! This crate contains:
//! - The [`transport::Transport`] port every network call goes through
//! - Response normalization into [`venmo_domain::ApiResult`]
//! - Local validation (required fields, payment amount bounds)
//! - The login state machine and the authenticated operations on
//!   [`VenmoClient`]
//!
//! ## Architecture Principles
//! - Only depends on `venmo-domain`
//! - All I/O via the `Transport` trait
//! - Operations never panic and never return anything but `ApiResult`

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod normalizer;
pub mod operations;
pub mod transport;
pub mod validation;

pub use auth::{LoginOutcome, Session, TwoFactorChallenge};
pub use client::{VenmoClient, VenmoClientBuilder};
pub use endpoints::Endpoints;
pub use normalizer::{normalize, normalize_headers};
pub use transport::{HttpMethod, RawRequest, RawResponse, Transport, TransportError};
pub use validation::validate_request_amount;
