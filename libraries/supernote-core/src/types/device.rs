/// Device identity as seen on the local network
use serde::{Deserialize, Serialize};

/// A reachable device running the browse server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Base URL of the device's web server, e.g. "http://192.168.1.20:8089"
    pub base_url: String,

    /// Display name if the device reports one
    pub name: Option<String>,
}

impl DeviceInfo {
    /// Create a device info for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            name: None,
        }
    }
}

impl std::fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.base_url),
            None => write!(f, "{}", self.base_url),
        }
    }
}
