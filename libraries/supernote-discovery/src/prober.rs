//! Probing a single candidate address.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use supernote_core::DeviceInfo;
use supernote_device_client::LISTING_MARKER;
use tracing::{debug, trace};

/// Checks whether one candidate address is a device browse server.
///
/// A trait so the scanner can be driven by fakes in tests.
#[async_trait]
pub trait DeviceProber: Send + Sync {
    /// Probe one base URL. `None` means "nothing usable here" — the host
    /// didn't answer, or answered with something that isn't a browse page.
    async fn probe(&self, base_url: &str) -> Option<DeviceInfo>;
}

/// Probes candidates over HTTP with a short per-host timeout.
pub struct HttpProber {
    http: Client,
}

impl HttpProber {
    /// Create a prober with the given per-host timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(format!("supernote-sync/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl DeviceProber for HttpProber {
    async fn probe(&self, base_url: &str) -> Option<DeviceInfo> {
        trace!(url = %base_url, "Probing candidate");

        let response = self.http.get(base_url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }

        // A browse page embeds its listing as a JSON literal; anything
        // else on this port is some other web server.
        let body = response.text().await.ok()?;
        if !body.contains(LISTING_MARKER) {
            return None;
        }

        debug!(url = %base_url, "Found device browse server");
        Some(DeviceInfo::new(base_url))
    }
}
