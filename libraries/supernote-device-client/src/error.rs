//! Error types for the device client.

use thiserror::Error;

/// Errors that can occur when talking to the device's browse server.
#[derive(Error, Debug)]
pub enum DeviceClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Device is offline or unreachable
    #[error("Device unreachable: {0}")]
    DeviceUnreachable(String),

    /// Device returned an HTTP error response
    #[error("Device error ({status}): {message}")]
    DeviceError { status: u16, message: String },

    /// Response did not look like a browse page, or the embedded
    /// listing could not be parsed
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Invalid device URL
    #[error("Invalid device URL: {0}")]
    InvalidUrl(String),

    /// IO error while writing a downloaded file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeviceClientError {
    /// Whether the failure is worth retrying within the same sync pass.
    ///
    /// Transport failures and server-side (5xx) responses are transient;
    /// malformed responses and local IO failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(_) | Self::DeviceUnreachable(_) => true,
            Self::DeviceError { status, .. } => *status >= 500,
            Self::Protocol(_) | Self::InvalidUrl(_) | Self::Io(_) => false,
        }
    }
}

/// Result type for device client operations.
pub type Result<T> = std::result::Result<T, DeviceClientError>;
