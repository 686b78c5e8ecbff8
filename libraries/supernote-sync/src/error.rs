use supernote_device_client::DeviceClientError;
use supernote_discovery::DiscoveryError;
use thiserror::Error;

/// Errors that can occur during sync operations
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Device client error: {0}")]
    Client(#[from] DeviceClientError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Remote path escapes the output directory: {0}")]
    UnsafePath(String),

    #[error("No device found on the local network")]
    DeviceNotFound,

    #[error("Sync was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, SyncError>;
