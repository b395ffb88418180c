//! Login protocol and the values it produces
//!
//! The primary login either completes directly or hands back a
//! [`TwoFactorChallenge`]; the caller then drives SMS dispatch and OTP
//! verification. See [`crate::VenmoClient::authenticate`].

mod grant;
mod orchestrator;
pub mod session;

pub use session::{LoginOutcome, Session, TwoFactorChallenge};
