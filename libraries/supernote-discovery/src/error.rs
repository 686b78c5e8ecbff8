//! Error types for device discovery.
//!
//! "No device found" is not an error; `DeviceScanner::discover` returns
//! `Ok(None)` for that, and the watch loop retries on its next interval.

use thiserror::Error;

/// Errors that can occur while scanning for a device.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Could not determine the local interface address
    #[error("Local address lookup failed: {0}")]
    LocalAddress(#[from] std::io::Error),

    /// The local address was not an IPv4 address we can sweep
    #[error("Cannot derive scan range from local address: {0}")]
    UnsupportedAddress(String),

    /// Probe HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
