//! Network boundary of the client
//!
//! Everything the client sends goes through a [`Transport`]; the concrete
//! HTTP implementation lives in `venmo-infra`.

pub mod ports;

pub use ports::{HttpMethod, RawRequest, RawResponse, Transport, TransportError};
