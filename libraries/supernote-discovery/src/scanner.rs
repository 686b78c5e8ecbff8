//! Candidate enumeration and the scan itself.

use crate::error::{DiscoveryError, Result};
use crate::prober::{DeviceProber, HttpProber};
use futures_util::stream::{self, StreamExt};
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::time::Duration;
use supernote_core::DeviceInfo;
use tracing::{debug, info};

/// Default port of the device's browse server.
pub const DEFAULT_PORT: u16 = 8089;

/// Scan parameters.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Port the browse server listens on
    pub port: u16,

    /// Per-host probe timeout
    pub probe_timeout: Duration,

    /// Deadline for the whole scan; expiry yields "not found"
    pub overall_timeout: Duration,

    /// How many candidates are probed at once
    pub concurrency: usize,

    /// Hosts to try before sweeping, e.g. a previously seen address
    pub hosts: Vec<String>,

    /// Whether to sweep the local /24 after the configured hosts
    pub sweep_subnet: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            probe_timeout: Duration::from_millis(800),
            overall_timeout: Duration::from_secs(15),
            concurrency: 32,
            hosts: Vec::new(),
            sweep_subnet: true,
        }
    }
}

/// Scans the local network for a device browse server.
///
/// An explicit, reinitializable instance; tests construct one around a
/// fake [`DeviceProber`].
pub struct DeviceScanner<P: DeviceProber> {
    prober: P,
    config: ScannerConfig,
}

impl DeviceScanner<HttpProber> {
    /// Scanner with an HTTP prober and the given config.
    pub fn with_http_prober(config: ScannerConfig) -> Result<Self> {
        let prober = HttpProber::new(config.probe_timeout)?;
        Ok(Self::new(prober, config))
    }
}

impl<P: DeviceProber> DeviceScanner<P> {
    pub fn new(prober: P, config: ScannerConfig) -> Self {
        Self { prober, config }
    }

    /// Run one scan.
    ///
    /// Returns `Ok(Some(device))` for the first candidate that answers as
    /// a browse server, `Ok(None)` if nothing responds before the overall
    /// deadline. Never hangs past the deadline.
    pub async fn discover(&self) -> Result<Option<DeviceInfo>> {
        let candidates = self.candidate_urls()?;
        debug!(
            candidates = candidates.len(),
            timeout_secs = self.config.overall_timeout.as_secs(),
            "Scanning for device"
        );

        let scan = self.probe_candidates(candidates);
        match tokio::time::timeout(self.config.overall_timeout, scan).await {
            Ok(Some(device)) => {
                info!(device = %device, "Device discovered");
                Ok(Some(device))
            }
            Ok(None) => {
                debug!("Scan finished with no device found");
                Ok(None)
            }
            Err(_elapsed) => {
                debug!("Scan deadline reached with no device found");
                Ok(None)
            }
        }
    }

    /// Probe candidates with bounded concurrency, first hit wins.
    ///
    /// Configured hosts are queued ahead of the subnet sweep, so a known
    /// address answers without waiting on the sweep.
    async fn probe_candidates(&self, candidates: Vec<String>) -> Option<DeviceInfo> {
        let mut probes = stream::iter(candidates)
            .map(|url| async move { self.prober.probe(&url).await })
            .buffered(self.config.concurrency);

        while let Some(result) = probes.next().await {
            if result.is_some() {
                return result;
            }
        }

        None
    }

    /// Candidate base URLs: configured hosts first, then the local /24.
    fn candidate_urls(&self) -> Result<Vec<String>> {
        let mut urls: Vec<String> = self
            .config
            .hosts
            .iter()
            .map(|host| self.host_url(host))
            .collect();

        if self.config.sweep_subnet {
            let local = local_ipv4()?;
            let octets = local.octets();

            for last in 1..=254u8 {
                if last == octets[3] {
                    continue;
                }
                let ip = Ipv4Addr::new(octets[0], octets[1], octets[2], last);
                urls.push(format!("http://{}:{}", ip, self.config.port));
            }
        }

        Ok(urls)
    }

    fn host_url(&self, host: &str) -> String {
        if host.starts_with("http://") || host.starts_with("https://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("http://{}:{}", host, self.config.port)
        }
    }
}

/// Local IPv4 address of the interface with a default route.
///
/// Connecting a UDP socket never sends a packet; it just asks the OS to
/// pick a source address.
fn local_ipv4() -> Result<Ipv4Addr> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.connect("8.8.8.8:80")?;
    let addr = socket.local_addr()?;

    match addr.ip() {
        IpAddr::V4(ip) => Ok(ip),
        IpAddr::V6(ip) => Err(DiscoveryError::UnsupportedAddress(ip.to_string())),
    }
}
