//! One sync cycle: resolve the device, then run a pass.

use crate::engine::{EngineConfig, SyncEngine};
use crate::error::{Result, SyncError};
use async_trait::async_trait;
use std::path::PathBuf;
use supernote_core::{PassReport, SyncTrigger};
use supernote_device_client::DeviceClient;
use supernote_discovery::{DeviceProber, DeviceScanner, HttpProber};
use tokio::sync::watch;
use tracing::{debug, info};

/// One discovery + listing + sync cycle.
///
/// The watch loop drives this trait; tests substitute fakes.
#[async_trait]
pub trait SyncRunner: Send + Sync {
    async fn run_cycle(
        &self,
        trigger: SyncTrigger,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<PassReport>;
}

enum DeviceSource<P: DeviceProber> {
    /// Known address, no discovery needed
    Fixed(String),
    /// Scan the local network each cycle
    Discover(DeviceScanner<P>),
}

/// Production runner: finds the device and syncs it to the output directory.
pub struct DeviceSyncRunner<P: DeviceProber = HttpProber> {
    source: DeviceSource<P>,
    output_dir: PathBuf,
    engine_config: EngineConfig,
}

impl DeviceSyncRunner<HttpProber> {
    /// Runner for a known device URL.
    pub fn with_url(
        url: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        engine_config: EngineConfig,
    ) -> Self {
        Self {
            source: DeviceSource::Fixed(url.into()),
            output_dir: output_dir.into(),
            engine_config,
        }
    }
}

impl<P: DeviceProber> DeviceSyncRunner<P> {
    /// Runner that rediscovers the device every cycle.
    pub fn with_scanner(
        scanner: DeviceScanner<P>,
        output_dir: impl Into<PathBuf>,
        engine_config: EngineConfig,
    ) -> Self {
        Self {
            source: DeviceSource::Discover(scanner),
            output_dir: output_dir.into(),
            engine_config,
        }
    }

    async fn resolve_base_url(&self) -> Result<String> {
        match &self.source {
            DeviceSource::Fixed(url) => Ok(url.clone()),
            DeviceSource::Discover(scanner) => {
                debug!("Discovering device");
                let device = scanner.discover().await?.ok_or(SyncError::DeviceNotFound)?;
                Ok(device.base_url)
            }
        }
    }
}

#[async_trait]
impl<P: DeviceProber> SyncRunner for DeviceSyncRunner<P> {
    async fn run_cycle(
        &self,
        trigger: SyncTrigger,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<PassReport> {
        let base_url = self.resolve_base_url().await?;
        info!(device = %base_url, "Starting sync cycle");

        let client = DeviceClient::new(base_url)?;
        let engine = SyncEngine::new(client, self.output_dir.clone(), self.engine_config.clone());
        engine.run_pass(trigger, shutdown).await
    }
}
