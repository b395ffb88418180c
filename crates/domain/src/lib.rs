//! # Venmo Domain
//!
//! Plain data shared by every layer of the Venmo client.
//!
//! This crate contains:
//! - Caller-supplied inputs (credentials, device identity, payment requests)
//! - The uniform result shape returned by every operation
//! - The closed error taxonomy
//! - Client configuration and wire constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
