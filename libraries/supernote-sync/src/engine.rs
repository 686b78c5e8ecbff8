//! One sync pass: listing vs. manifest, downloads, per-file outcomes.

use crate::error::{Result, SyncError};
use crate::manifest::Manifest;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use supernote_core::{FileOutcome, PassReport, RemoteFile, SyncTrigger};
use supernote_device_client::DeviceClient;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Per-pass behavior knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Retries per file for transient network failures
    pub download_retries: u32,

    /// Base backoff between retries (multiplied by the attempt number)
    pub retry_backoff: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            download_retries: 3,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// Runs sync passes against one device for one output directory.
pub struct SyncEngine {
    client: DeviceClient,
    output_dir: PathBuf,
    config: EngineConfig,
}

impl SyncEngine {
    pub fn new(client: DeviceClient, output_dir: impl Into<PathBuf>, config: EngineConfig) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
            config,
        }
    }

    /// Run one full sync pass.
    ///
    /// Lists every file on the device, skips entries the manifest already
    /// records unchanged, downloads the rest (atomically: `.part` then
    /// rename), and persists the manifest after each completed file.
    ///
    /// A failed download fails that file's outcome and the pass continues.
    /// A listing failure fails the whole pass. The shutdown flag is honored
    /// between files, never mid-download.
    pub async fn run_pass(
        &self,
        trigger: SyncTrigger,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<PassReport> {
        let started_at = chrono::Utc::now();
        let start = std::time::Instant::now();

        let files = self.client.list_files().await?;
        let mut manifest = Manifest::load(&self.output_dir).await?;

        debug!(
            files = files.len(),
            known = manifest.len(),
            "Starting sync pass"
        );

        let mut outcomes = Vec::with_capacity(files.len());
        for file in &files {
            if *shutdown.borrow() {
                return Err(SyncError::Cancelled);
            }

            if manifest.is_current(file) {
                debug!(uri = %file.uri, "Unchanged, skipping");
                outcomes.push(FileOutcome::skipped(&file.uri));
                continue;
            }

            match self.download_one(file).await {
                Ok(()) => {
                    // Record and flush before moving to the next file so an
                    // interrupted pass never forgets a completed download.
                    manifest.record(file);
                    manifest.save().await?;
                    outcomes.push(FileOutcome::downloaded(&file.uri));
                }
                Err(e) => {
                    warn!(uri = %file.uri, error = %e, "File sync failed");
                    outcomes.push(FileOutcome::failed(&file.uri, e.to_string()));
                }
            }
        }

        let completed_at = chrono::Utc::now();
        let report = PassReport {
            trigger,
            started_at: started_at.to_rfc3339(),
            completed_at: completed_at.to_rfc3339(),
            duration_seconds: start.elapsed().as_secs(),
            files_listed: files.len(),
            outcomes,
        };

        info!(
            files = report.files_listed,
            downloaded = report.downloaded(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Sync pass complete"
        );

        Ok(report)
    }

    /// Download one file to its final path via a `.part` sibling.
    ///
    /// The final name only ever appears via rename, so a crash or failure
    /// mid-download cannot leave a partial file under it.
    async fn download_one(&self, file: &RemoteFile) -> Result<()> {
        let final_path = self.destination_for(file)?;
        let part_path = part_path_for(&final_path);

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self
                .client
                .download_file(&file.uri, &part_path, |_| {})
                .await
            {
                Ok(()) => break,
                Err(e) if e.is_transient() && attempt <= self.config.download_retries => {
                    warn!(
                        uri = %file.uri,
                        attempt,
                        error = %e,
                        "Transient download failure, retrying"
                    );
                    tokio::time::sleep(self.config.retry_backoff * attempt).await;
                }
                Err(e) => {
                    // Best effort: don't leave a stale .part behind.
                    let _ = tokio::fs::remove_file(&part_path).await;
                    return Err(e.into());
                }
            }
        }

        tokio::fs::rename(&part_path, &final_path).await?;
        Ok(())
    }

    /// Local destination for a remote file, confined to the output directory.
    ///
    /// The uri comes straight from the device listing, so anything that
    /// could step outside the output directory (".." or other non-plain
    /// path components) is rejected.
    fn destination_for(&self, file: &RemoteFile) -> Result<PathBuf> {
        let relative = Path::new(file.relative_path());
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

        if !plain || relative.as_os_str().is_empty() {
            return Err(SyncError::UnsafePath(file.uri.clone()));
        }

        Ok(self.output_dir.join(relative))
    }
}

fn part_path_for(final_path: &Path) -> PathBuf {
    let mut name = final_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(".part");
    final_path.with_file_name(name)
}
