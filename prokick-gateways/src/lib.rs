//! # prokick-gateways
//!
//! HTTP implementations of the gateway contracts in `prokick-core`: the
//! ProKick backend client and the Georef (Argentine geographic reference)
//! client.

use std::time::Duration;

pub mod backend;
pub mod georef;

pub use self::{backend::HttpBackendGateway, georef::GeorefGateway};

/// Applied to every outbound request so a stalled upstream cannot pin a
/// worker indefinitely.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
